//! Grid extraction for ruled or aligned table regions.
//!
//! Row bands come from ruling lines (or from the distinct baselines of the
//! text in range). The column count is the most frequent element count over
//! the non-empty bands. Rows with that count are taken as they are; the others
//! are re-bucketed by right edge against column limits learned from the
//! well-formed rows, so every emitted row has the same width.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{distinct_sorted, Page, PositionedElement, Table};
use crate::text::normalize;

/// Rectangle of a page that holds a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableRegion {
    pub y_min: f32,
    pub y_max: f32,
    #[serde(default = "default_x_min")]
    pub x_min: f32,
    #[serde(default = "default_x_max")]
    pub x_max: f32,
}

fn default_x_min() -> f32 {
    -1.0
}

fn default_x_max() -> f32 {
    10_000.0
}

impl TableRegion {
    /// Region spanning the full page width between two y coordinates.
    pub fn new(y_min: f32, y_max: f32) -> Self {
        Self {
            y_min,
            y_max,
            x_min: default_x_min(),
            x_max: default_x_max(),
        }
    }

    /// Restrict the region horizontally.
    pub fn with_x_range(mut self, x_min: f32, x_max: f32) -> Self {
        self.x_min = x_min;
        self.x_max = x_max;
        self
    }

    fn holds(&self, element: &PositionedElement) -> bool {
        element.y0() > self.y_min
            && element.y0() < self.y_max
            && element.x0() > self.x_min
            && element.x0() < self.x_max
    }
}

/// Grid extractor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Use horizontal ruling lines as row boundaries instead of text baselines
    pub use_ruling_lines: bool,
    /// Promote row 0 to a header row and column 0 to a row index
    pub header: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            use_ruling_lines: true,
            header: false,
        }
    }
}

/// Builds rectangular tables from page regions.
#[derive(Debug, Clone, Default)]
pub struct GridExtractor {
    config: GridConfig,
}

impl GridExtractor {
    /// Create an extractor with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: GridConfig) -> Self {
        Self { config }
    }

    /// Extract the table inside `region` of `page`.
    pub fn extract(&self, page: &Page, region: &TableRegion) -> Result<Table> {
        let elements: Vec<&PositionedElement> =
            page.text_elements().filter(|e| region.holds(e)).collect();
        if elements.is_empty() {
            return Err(Error::EmptyTable);
        }

        let boundaries = self.row_boundaries(page, region, &elements);
        let bands = bucket_rows(&elements, &boundaries);
        let n_cols = majority_count(&bands).ok_or(Error::EmptyTable)?;
        let limits = column_limits(&bands, n_cols, region);
        log::debug!(
            "table on page {}: {} bands, {} columns, limits {:?}",
            page.number,
            bands.len(),
            n_cols,
            limits
        );

        let mut rows: Vec<Vec<String>> = bands
            .iter()
            .map(|band| materialize_row(band, n_cols, &limits))
            .collect();

        if rows.first().is_some_and(|r| r.iter().all(String::is_empty)) {
            rows.remove(0);
        }
        if rows.is_empty() {
            return Err(Error::EmptyTable);
        }

        let table = Table::new(rows);
        Ok(if self.config.header {
            table.with_header()
        } else {
            table
        })
    }

    fn row_boundaries(
        &self,
        page: &Page,
        region: &TableRegion,
        elements: &[&PositionedElement],
    ) -> Vec<f32> {
        let inner = if self.config.use_ruling_lines {
            page.ruling_ys(region.y_min, region.y_max)
        } else {
            distinct_sorted(elements.iter().map(|e| e.y0()).collect())
        };

        let mut boundaries = Vec::with_capacity(inner.len() + 2);
        boundaries.push(region.y_max);
        boundaries.extend(inner.into_iter().rev());
        boundaries.push(region.y_min);
        boundaries
    }
}

/// Extract a table with the default header handling.
pub fn extract_table(page: &Page, region: &TableRegion, use_ruling_lines: bool) -> Result<Table> {
    GridExtractor::with_config(GridConfig {
        use_ruling_lines,
        header: false,
    })
    .extract(page, region)
}

/// Assign elements to bands `(lower, upper]`, each sorted left to right.
fn bucket_rows<'a>(
    elements: &[&'a PositionedElement],
    boundaries: &[f32],
) -> Vec<Vec<&'a PositionedElement>> {
    boundaries
        .windows(2)
        .map(|w| {
            let (upper, lower) = (w[0], w[1]);
            let mut band: Vec<&PositionedElement> = elements
                .iter()
                .copied()
                .filter(|e| e.y0() > lower && e.y0() <= upper)
                .collect();
            band.sort_by(|a, b| a.x0().total_cmp(&b.x0()));
            band
        })
        .collect()
}

/// Most frequent element count over non-empty bands; ties go to the smaller count.
fn majority_count(bands: &[Vec<&PositionedElement>]) -> Option<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for band in bands.iter().filter(|b| !b.is_empty()) {
        *counts.entry(band.len()).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|(len_a, freq_a), (len_b, freq_b)| freq_a.cmp(freq_b).then(len_b.cmp(len_a)))
        .map(|(len, _)| len)
}

/// `n_cols + 1` limits: x_min, running max right edges, x_max.
fn column_limits(bands: &[Vec<&PositionedElement>], n_cols: usize, region: &TableRegion) -> Vec<f32> {
    let mut maxima = vec![f32::NEG_INFINITY; n_cols];
    for band in bands.iter().filter(|b| b.len() == n_cols) {
        for (max, element) in maxima.iter_mut().zip(band) {
            *max = max.max(element.x1());
        }
    }

    let mut limits = Vec::with_capacity(n_cols + 1);
    limits.push(region.x_min);
    limits.extend(maxima.into_iter().take(n_cols.saturating_sub(1)));
    limits.push(region.x_max);
    limits
}

fn materialize_row(band: &[&PositionedElement], n_cols: usize, limits: &[f32]) -> Vec<String> {
    if band.len() == n_cols {
        return band.iter().map(|e| normalize(&e.text_content())).collect();
    }
    limits
        .windows(2)
        .map(|w| {
            let text: String = band
                .iter()
                .filter(|e| e.x1() > w[0] && e.x1() <= w[1])
                .map(|e| e.text_content())
                .collect();
            normalize(&text)
        })
        .collect()
}
