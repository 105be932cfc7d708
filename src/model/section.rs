//! Section type.

use serde::{Deserialize, Serialize};

/// A titled `(header, body)` text unit attributed to a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section title (usually the document or chapter title)
    pub title: String,

    /// Section header; empty only for a document's lead-in text
    pub header: String,

    /// Normalized body text
    pub body: String,

    /// Page on which the section was flushed (1-indexed)
    pub page_number: u32,
}

impl Section {
    /// Create a new section.
    pub fn new(
        title: impl Into<String>,
        header: impl Into<String>,
        body: impl Into<String>,
        page_number: u32,
    ) -> Self {
        Self {
            title: title.into(),
            header: header.into(),
            body: body.into(),
            page_number,
        }
    }

    /// Check if this is the header-less lead-in section.
    pub fn is_lead_in(&self) -> bool {
        self.header.is_empty()
    }
}
