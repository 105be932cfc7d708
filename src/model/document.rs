//! Document-level types: the input document and the emitted records.

use super::{Page, Section};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A document as delivered by the geometry-extraction engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Original file name (e.g. `CIO Weekly 2024-05-16.pdf`)
    #[serde(default)]
    pub file_name: String,

    /// Pages in document order
    pub pages: Vec<Page>,

    /// Raw creation date from the document info dictionary (`D:YYYYMMDDHHmmSS...`)
    #[serde(default)]
    pub creation_date: Option<String>,
}

impl SourceDocument {
    /// Create a new document with the given file name and pages.
    pub fn new(file_name: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            file_name: file_name.into(),
            pages,
            creation_date: None,
        }
    }

    /// Set the raw creation date.
    pub fn with_creation_date(mut self, date: impl Into<String>) -> Self {
        self.creation_date = Some(date.into());
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Result<&Page> {
        if page_num == 0 {
            return Err(Error::PageOutOfRange(page_num, self.page_count()));
        }
        self.pages
            .get((page_num - 1) as usize)
            .ok_or(Error::PageOutOfRange(page_num, self.page_count()))
    }

    /// Index (0-based) of the first page with a text element containing `title`.
    pub fn first_page_containing(&self, title: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.contains_text(title))
    }

    /// File name without directories and extension.
    pub fn file_stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().trim().to_string())
            .unwrap_or_default()
    }

    /// File name without directories.
    pub fn base_name(&self) -> String {
        Path::new(&self.file_name)
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Document-level metadata resolved from anchors.
///
/// Each field is empty when its anchor could not be found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// ISO-8601 publication date (`YYYY-MM-DD`)
    pub publication_date: String,

    /// Human-readable document name
    pub document_name: String,

    /// Source document identifier
    pub source_document: String,
}

/// One output record per section, as consumed by indexing jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Fresh unique identifier, independent of content
    pub id: String,
    pub publication_date: String,
    pub source_document: String,
    /// Template family tag
    pub series: String,
    /// 1-based page number
    pub page_number: u32,
    pub document_name: String,
    pub section_title: String,
    pub section_header: String,
    pub section_subcategory: String,
    /// Never absent; empty when the section has no body
    pub section_text: String,
}

impl DocumentRecord {
    /// Build a record for a section, generating a new id.
    pub fn from_section(section: &Section, metadata: &Metadata, series: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            publication_date: metadata.publication_date.clone(),
            source_document: metadata.source_document.clone(),
            series: series.to_string(),
            page_number: section.page_number,
            document_name: metadata.document_name.clone(),
            section_title: section.title.clone(),
            section_header: section.header.clone(),
            section_subcategory: String::new(),
            section_text: section.body.clone(),
        }
    }
}
