//! Document model types for positioned page content and segmentation output.
//!
//! The input side (`PositionedElement`, `Page`, `SourceDocument`) is the shape
//! produced by any geometry-extraction engine. The output side (`Section`,
//! `Table`, `DocumentRecord`) are value objects with no reference back to the
//! page they came from.

mod document;
mod element;
mod page;
mod section;
mod table;

pub use document::{DocumentRecord, Metadata, SourceDocument};
pub use element::{BBox, Color, ElementKind, PositionedElement, TextRun};
pub use page::Page;
pub(crate) use page::distinct_sorted;
pub use section::Section;
pub use table::Table;
