//! Geometry-heuristic segmentation primitives.
//!
//! Each step is a small value type built from a [`DocumentProfile`](crate::DocumentProfile):
//!
//! - [`ColumnSplitter`]: partitions page elements into left/right reading streams
//! - [`FooterTrimmer`]: drops trailing small-print elements from each stream
//! - [`HeaderClassifier`]: splits an element into header prefix and body
//! - [`SectionAccumulator`]: groups classified elements into sections across pages
//! - [`GridExtractor`]: builds rectangular tables from ruled regions
//! - [`MetadataResolver`]: finds publication date, document name and source id

mod classify;
mod columns;
mod footer;
mod metadata;
mod sections;
mod table;

pub use classify::{Classified, HeaderClassifier, HeaderRule};
pub use columns::{Anchor, ColumnSplit, ColumnSplitter, SplitState};
pub use footer::FooterTrimmer;
pub use metadata::{
    parse_creation_date, parse_date, DateRule, MetadataResolver, NameRule, PageNumbering,
    SourceIdRule,
};
pub use sections::{
    accumulate, merge_headerless, BlockFilter, OpenSection, SectionAccumulator, SkipBlock,
};
pub use table::{extract_table, GridConfig, GridExtractor, TableRegion};
