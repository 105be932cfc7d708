//! Table types.

use serde::{Deserialize, Serialize};

/// A rectangular grid of normalized cell strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table; every row has `column_count` cells
    pub rows: Vec<Vec<String>>,

    /// Number of header rows at the top (0 or 1)
    pub header_rows: u8,

    /// Whether column 0 names the rows
    pub has_index: bool,
}

impl Table {
    /// Create a table from rows.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            header_rows: 0,
            has_index: false,
        }
    }

    /// Promote row 0 to a header row and column 0 to a row index.
    pub fn with_header(mut self) -> Self {
        self.header_rows = 1;
        self.has_index = true;
        self
    }

    /// Use column 0 as a row index without a header row.
    pub fn with_index(mut self) -> Self {
        self.has_index = true;
        self
    }

    /// Get the number of rows (including header rows).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check if every row has the same width.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Header cells, excluding the index column.
    pub fn header(&self) -> Option<&[String]> {
        if self.header_rows == 0 {
            return None;
        }
        let skip = usize::from(self.has_index);
        self.rows.first().map(|r| &r[skip.min(r.len())..])
    }

    /// Body rows (non-header).
    pub fn body(&self) -> &[Vec<String>] {
        let start = (self.header_rows as usize).min(self.rows.len());
        &self.rows[start..]
    }

    /// Row names from the index column.
    pub fn index(&self) -> Option<Vec<&str>> {
        if !self.has_index {
            return None;
        }
        Some(
            self.body()
                .iter()
                .map(|r| r.first().map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// Look up a body row by its index name, returning the non-index cells.
    pub fn row_by_name(&self, name: &str) -> Option<&[String]> {
        if !self.has_index {
            return None;
        }
        self.body()
            .iter()
            .find(|r| r.first().map(|c| c == name).unwrap_or(false))
            .map(|r| &r[1..])
    }

    /// Read the table as key/value pairs: column 0 is the key, remaining cells
    /// are joined with a single space.
    pub fn key_values(&self) -> Vec<(String, String)> {
        self.body()
            .iter()
            .filter_map(|r| {
                let (key, rest) = r.split_first()?;
                let value = rest
                    .iter()
                    .filter(|c| !c.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                Some((key.clone(), value))
            })
            .collect()
    }

    /// Get a cell by row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
