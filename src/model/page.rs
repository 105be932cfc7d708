//! Page-level types.

use super::PositionedElement;
use serde::{Deserialize, Serialize};

/// A single page of positioned elements, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Elements in extraction order (not necessarily reading order)
    pub elements: Vec<PositionedElement>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }

    /// Create a page from a list of elements.
    pub fn with_elements(number: u32, elements: Vec<PositionedElement>) -> Self {
        Self { number, elements }
    }

    /// Add an element to the page.
    pub fn push(&mut self, element: PositionedElement) {
        self.elements.push(element);
    }

    /// Text elements in extraction order.
    pub fn text_elements(&self) -> impl Iterator<Item = &PositionedElement> {
        self.elements.iter().filter(|e| e.is_text())
    }

    /// Rectangle primitives on the page.
    pub fn rects(&self) -> Vec<&PositionedElement> {
        self.elements.iter().filter(|e| e.is_rect()).collect()
    }

    /// Distinct y0 values of horizontal ruling lines strictly inside `(y_min, y_max)`.
    pub fn ruling_ys(&self, y_min: f32, y_max: f32) -> Vec<f32> {
        let ys = self
            .elements
            .iter()
            .filter(|e| e.is_horizontal_line() && e.y0() > y_min && e.y0() < y_max)
            .map(|e| e.y0())
            .collect();
        distinct_sorted(ys)
    }

    /// The y0 of the n-th lowest ruling line (0-indexed), counting duplicates.
    pub fn nth_ruling_y(&self, n: usize) -> Option<f32> {
        let mut ys: Vec<f32> = self
            .elements
            .iter()
            .filter(|e| e.is_line())
            .map(|e| e.y0())
            .collect();
        ys.sort_by(f32::total_cmp);
        ys.get(n).copied()
    }

    /// Check if any text element contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_elements().any(|e| e.contains(needle))
    }

    /// Concatenated raw text of all text elements.
    pub fn plain_text(&self) -> String {
        self.text_elements()
            .map(|e| e.text_content())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements on the page.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

/// Sort ascending and drop exact duplicates.
pub(crate) fn distinct_sorted(mut values: Vec<f32>) -> Vec<f32> {
    values.sort_by(f32::total_cmp);
    values.dedup();
    values
}
