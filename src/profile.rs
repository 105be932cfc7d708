//! Per-template configuration.
//!
//! A [`DocumentProfile`] holds everything that differs between report
//! families: column threshold, anchors, header rule, stop-list and metadata
//! rules. Profiles are plain data, loaded from JSON or built in code, and are
//! never mutated while a document is processed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::segment::{
    Anchor, ColumnSplitter, DateRule, FooterTrimmer, HeaderClassifier, HeaderRule,
    MetadataResolver, NameRule, PageNumbering, SkipBlock, SourceIdRule,
};
use crate::text::TextCleaner;

/// How a document is cut into records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentationMode {
    /// Two-column header/body sections
    #[default]
    Sections,
    /// One record per page with all of its prose text
    PageText,
}

/// Configuration for one document template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentProfile {
    /// Template family tag copied into every record
    pub series: String,

    /// Fixed section title; the document name is used when absent
    pub section_title: Option<String>,

    /// Segmentation mode
    pub mode: SegmentationMode,

    /// Elements with x0 below this are in the left column
    pub column_threshold: f32,

    /// Elements skipped at the start of every page
    pub element_offset: usize,

    /// Elements with y0 at or above this are running headers
    pub content_max_y: Option<f32>,

    /// Content starts after this anchor
    pub section_start: Option<Anchor>,

    /// Content ends on the page holding this anchor
    pub section_end: Option<Anchor>,

    /// Trailing elements at or below this font size are footers; sizes are
    /// truncated to whole points first, so 6.9pt is a footer at 6
    pub footer_font_size: f32,

    /// Header/body rule
    pub header_rule: HeaderRule,

    /// Elements starting with any of these are dropped
    pub exclude_prefixes: Vec<String>,

    /// Block of elements (e.g. a chart) to skip
    pub skip_block: Option<SkipBlock>,

    /// Fold header-less sections into the preceding headed section
    pub merge_headerless: bool,

    /// Processing halts at the first of these phrases
    pub stop_strings: Vec<String>,

    /// Publication date rule
    pub date: DateRule,

    /// Document name rule
    pub name: NameRule,

    /// Source id rule
    pub source_id: SourceIdRule,

    /// Page number rule
    pub page_numbering: PageNumbering,
}

impl DocumentProfile {
    /// Create a profile with defaults for the given series.
    pub fn new(series: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            ..Default::default()
        }
    }

    /// Load a profile from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check thresholds and patterns.
    pub fn validate(&self) -> Result<()> {
        if self.series.trim().is_empty() {
            return Err(Error::InvalidProfile("series must not be empty".to_string()));
        }
        if !self.column_threshold.is_finite() || self.column_threshold < 0.0 {
            return Err(Error::InvalidProfile(format!(
                "column_threshold must be a non-negative number, got {}",
                self.column_threshold
            )));
        }
        if !self.footer_font_size.is_finite() || self.footer_font_size < 0.0 {
            return Err(Error::InvalidProfile(format!(
                "footer_font_size must be a non-negative number, got {}",
                self.footer_font_size
            )));
        }
        if let HeaderRule::Color { colors, .. } = &self.header_rule {
            if colors.is_empty() {
                return Err(Error::InvalidProfile(
                    "color header rule needs at least one color".to_string(),
                ));
            }
        }
        if let Some(block) = &self.skip_block {
            if block.start.is_empty() || block.end.is_empty() {
                return Err(Error::InvalidProfile(
                    "skip_block needs start and end prefixes".to_string(),
                ));
            }
        }
        self.metadata_resolver().map(|_| ())
    }

    /// Set the fixed section title.
    pub fn with_section_title(mut self, title: impl Into<String>) -> Self {
        self.section_title = Some(title.into());
        self
    }

    /// Set the segmentation mode.
    pub fn with_mode(mut self, mode: SegmentationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use one record per page.
    pub fn page_text(mut self) -> Self {
        self.mode = SegmentationMode::PageText;
        self
    }

    /// Set the column threshold.
    pub fn with_column_threshold(mut self, x: f32) -> Self {
        self.column_threshold = x;
        self
    }

    /// Skip elements at the start of every page.
    pub fn with_element_offset(mut self, offset: usize) -> Self {
        self.element_offset = offset;
        self
    }

    /// Drop running headers at or above `y`.
    pub fn with_content_max_y(mut self, y: f32) -> Self {
        self.content_max_y = Some(y);
        self
    }

    /// Set the section-start anchor.
    pub fn with_section_start(mut self, anchor: Anchor) -> Self {
        self.section_start = Some(anchor);
        self
    }

    /// Set the section-end anchor.
    pub fn with_section_end(mut self, anchor: Anchor) -> Self {
        self.section_end = Some(anchor);
        self
    }

    /// Set the footer font-size threshold.
    pub fn with_footer_font_size(mut self, size: f32) -> Self {
        self.footer_font_size = size;
        self
    }

    /// Set the header rule.
    pub fn with_header_rule(mut self, rule: HeaderRule) -> Self {
        self.header_rule = rule;
        self
    }

    /// Drop elements starting with `prefix`.
    pub fn with_exclude_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.exclude_prefixes.push(prefix.into());
        self
    }

    /// Skip blocks delimited by the given prefixes.
    pub fn with_skip_block(mut self, block: SkipBlock) -> Self {
        self.skip_block = Some(block);
        self
    }

    /// Enable or disable header-less section merging.
    pub fn with_merge_headerless(mut self, merge: bool) -> Self {
        self.merge_headerless = merge;
        self
    }

    /// Add a stop phrase.
    pub fn with_stop_string(mut self, stop: impl Into<String>) -> Self {
        self.stop_strings.push(stop.into());
        self
    }

    /// Set the publication date rule.
    pub fn with_date_rule(mut self, rule: DateRule) -> Self {
        self.date = rule;
        self
    }

    /// Set the document name rule.
    pub fn with_name_rule(mut self, rule: NameRule) -> Self {
        self.name = rule;
        self
    }

    /// Set the source id rule.
    pub fn with_source_id(mut self, rule: SourceIdRule) -> Self {
        self.source_id = rule;
        self
    }

    /// Set the page number rule.
    pub fn with_page_numbering(mut self, rule: PageNumbering) -> Self {
        self.page_numbering = rule;
        self
    }

    /// Column splitter for this profile.
    pub fn splitter(&self) -> ColumnSplitter {
        ColumnSplitter::new(self.column_threshold)
            .with_offset(self.element_offset)
            .with_start_anchor(self.section_start.clone())
            .with_end_anchor(self.section_end.clone())
            .with_content_max_y(self.content_max_y)
    }

    /// Footer trimmer for this profile.
    pub fn footer_trimmer(&self) -> FooterTrimmer {
        FooterTrimmer::new(self.footer_font_size)
    }

    /// Header classifier for this profile.
    pub fn classifier(&self) -> HeaderClassifier {
        HeaderClassifier::new(self.header_rule.clone())
    }

    /// Text cleaner with this profile's stop-list.
    pub fn cleaner(&self) -> TextCleaner {
        TextCleaner::new(&self.stop_strings)
    }

    /// Metadata resolver for this profile.
    pub fn metadata_resolver(&self) -> Result<MetadataResolver> {
        MetadataResolver::new(
            self.series.clone(),
            self.date.clone(),
            self.name.clone(),
            self.source_id,
        )
    }
}

impl Default for DocumentProfile {
    fn default() -> Self {
        Self {
            series: "DOCUMENT".to_string(),
            section_title: None,
            mode: SegmentationMode::default(),
            column_threshold: 250.0,
            element_offset: 0,
            content_max_y: None,
            section_start: None,
            section_end: None,
            footer_font_size: 6.0,
            header_rule: HeaderRule::default(),
            exclude_prefixes: Vec::new(),
            skip_block: None,
            merge_headerless: false,
            stop_strings: Vec::new(),
            date: DateRule::default(),
            name: NameRule::default(),
            source_id: SourceIdRule::default(),
            page_numbering: PageNumbering::default(),
        }
    }
}
