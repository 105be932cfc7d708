//! # docseg
//!
//! Geometry-heuristic segmentation of fixed-layout research documents.
//!
//! Pages arrive as positioned text boxes, ruling lines and rectangles. A
//! [`DocumentProfile`] describes one report template, and the engine turns each
//! document into titled `(header, body)` sections, ruled tables and metadata,
//! using nothing but coordinates, font sizes and glyph colors.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docseg::{render, Docseg, DocumentProfile};
//!
//! fn main() -> docseg::Result<()> {
//!     let profile = DocumentProfile::from_json_file("profiles/cio_weekly.json")?;
//!     let report = Docseg::new(profile).process_files(&["weekly.json"])?;
//!
//!     println!("{}", render::report_to_json(&report, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! For every page, in order: split columns, trim footers, classify
//! header/body, accumulate sections. Metadata is resolved once per document.
//! Tables are extracted on demand with [`extract_table`].

pub mod embed;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod profile;
pub mod render;
pub mod segment;
pub mod source;
pub mod text;

// Re-export commonly used types
pub use embed::{annotate, embed_records, embed_with_retry, EmbeddedRecord, Embedder, RetryPolicy};
pub use error::{Error, Result};
pub use model::{
    BBox, Color, DocumentRecord, ElementKind, Metadata, Page, PositionedElement, Section,
    SourceDocument, Table, TextRun,
};
pub use pipeline::{process_batch, process_paths, BatchReport, DocumentFailure, Segmenter};
pub use profile::{DocumentProfile, SegmentationMode};
pub use render::JsonFormat;
pub use segment::{
    extract_table, Anchor, DateRule, GridConfig, GridExtractor, HeaderRule, NameRule,
    PageNumbering, SkipBlock, SourceIdRule, TableRegion,
};
pub use source::{JsonPageSource, PageSource};
pub use text::{normalize, TextCleaner};

use std::path::Path;

/// Segment one document with a profile.
///
/// # Example
///
/// ```no_run
/// use docseg::{load_document, segment, DocumentProfile};
///
/// let doc = load_document("weekly.json").unwrap();
/// let records = segment(&doc, &DocumentProfile::new("CIO Weekly")).unwrap();
/// println!("{} sections", records.len());
/// ```
pub fn segment(doc: &SourceDocument, profile: &DocumentProfile) -> Result<Vec<DocumentRecord>> {
    Segmenter::new(profile)?.process(doc)
}

/// Load a JSON page dump.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    JsonPageSource::new().load(path.as_ref())
}

/// Builder for segmenting documents with one profile.
///
/// # Example
///
/// ```no_run
/// use docseg::{Docseg, DocumentProfile, HeaderRule};
///
/// let profile = DocumentProfile::new("CIO Weekly")
///     .with_column_threshold(270.0)
///     .with_header_rule(HeaderRule::font_size(12.0));
/// let report = Docseg::new(profile)
///     .sequential()
///     .process_files(&["a.json", "b.json"])?;
/// # Ok::<(), docseg::Error>(())
/// ```
pub struct Docseg {
    profile: DocumentProfile,
    parallel: bool,
    source: Box<dyn PageSource>,
}

impl Docseg {
    /// Create a builder for a profile.
    pub fn new(profile: DocumentProfile) -> Self {
        Self {
            profile,
            parallel: cfg!(feature = "parallel"),
            source: Box::new(JsonPageSource::new()),
        }
    }

    /// Create a builder from a profile file.
    pub fn from_profile_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DocumentProfile::from_json_file(path)?))
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Use a different page source for file input.
    pub fn with_source(mut self, source: impl PageSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// The profile in use.
    pub fn profile(&self) -> &DocumentProfile {
        &self.profile
    }

    /// Segment one document.
    pub fn process(&self, doc: &SourceDocument) -> Result<Vec<DocumentRecord>> {
        segment(doc, &self.profile)
    }

    /// Segment a batch of documents.
    pub fn process_batch(&self, docs: &[SourceDocument]) -> Result<BatchReport> {
        process_batch(docs, &self.profile, self.parallel)
    }

    /// Load and segment files through the page source.
    pub fn process_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<BatchReport> {
        process_paths(self.source.as_ref(), paths, &self.profile, self.parallel)
    }

    /// Extract a table from a page of a document.
    pub fn table(&self, doc: &SourceDocument, page: u32, region: &TableRegion) -> Result<Table> {
        extract_table(doc.get_page(page)?, region, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> SourceDocument {
        SourceDocument::new(
            "weekly.pdf",
            vec![Page::with_elements(
                1,
                vec![PositionedElement::text_runs(
                    BBox::new(50.0, 700.0, 200.0, 720.0),
                    vec![
                        TextRun::new("Outlook\n", 14.0, Color::black()),
                        TextRun::new("Constructive.", 9.0, Color::black()),
                    ],
                )],
            )],
        )
    }

    #[test]
    fn test_segment() {
        let records = segment(&doc(), &DocumentProfile::new("CIO Weekly")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].section_header, "Outlook");
        assert_eq!(records[0].section_text, "Constructive.");
        assert_eq!(records[0].section_title, "weekly");
        assert_eq!(records[0].source_document, "weekly.pdf");
    }

    #[test]
    fn test_builder_batch() {
        let docseg = Docseg::new(DocumentProfile::new("CIO Weekly")).sequential();
        let report = docseg.process_batch(&[doc(), doc()]).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_ne!(report.records[0].id, report.records[1].id);
    }

    #[test]
    fn test_table_page_out_of_range() {
        let docseg = Docseg::new(DocumentProfile::new("X"));
        let err = docseg
            .table(&doc(), 9, &TableRegion::new(0.0, 100.0))
            .unwrap_err();
        assert!(matches!(err, Error::PageOutOfRange(9, 1)));
    }
}
