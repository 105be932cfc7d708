//! Document metadata resolution: publication date, document name, source id.
//!
//! Every lookup returns a `Result`; [`MetadataResolver::resolve`] turns
//! failures into empty fields so that metadata stays best-effort.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Color, Metadata, Page, PositionedElement, SourceDocument};
use crate::text::{concat_lines, normalize};

const DEFAULT_DATE_PATTERN: &str = r"(\d{1,2}\s+[A-Za-z]+\s+\d{4})";
const DEFAULT_DATE_FORMAT: &str = "%d %B %Y";
const FILE_NAME_DATE_PATTERN: &str = r"\d{4}-\d{2}-\d{2}";
const ISO_FORMAT: &str = "%Y-%m-%d";

fn default_page() -> u32 {
    1
}

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_file_name_pattern() -> String {
    FILE_NAME_DATE_PATTERN.to_string()
}

fn default_iso_format() -> String {
    ISO_FORMAT.to_string()
}

/// Where the publication date comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DateRule {
    /// The n-th text element of a page
    Element {
        #[serde(default = "default_page")]
        page: u32,
        #[serde(default)]
        index: usize,
        #[serde(default = "default_date_pattern")]
        pattern: String,
        #[serde(default = "default_date_format")]
        format: String,
    },
    /// The first text element of a page matching `pattern`
    FirstMatch {
        #[serde(default = "default_page")]
        page: u32,
        #[serde(default = "default_date_pattern")]
        pattern: String,
        #[serde(default = "default_date_format")]
        format: String,
    },
    /// A date embedded in the file name
    FileName {
        #[serde(default = "default_file_name_pattern")]
        pattern: String,
        #[serde(default = "default_iso_format")]
        format: String,
    },
    /// The document's creation date (`D:YYYYMMDDHHmmSS...`)
    #[default]
    CreationDate,
}

impl DateRule {
    fn pattern(&self) -> Option<&str> {
        match self {
            DateRule::Element { pattern, .. }
            | DateRule::FirstMatch { pattern, .. }
            | DateRule::FileName { pattern, .. } => Some(pattern),
            DateRule::CreationDate => None,
        }
    }
}

/// Where the document name comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NameRule {
    /// First text element, after `skip` elements, printed entirely in `color`
    Color {
        color: Color,
        #[serde(default = "default_page")]
        page: u32,
        #[serde(default)]
        skip: usize,
    },
    /// Text following `marker` in the element that starts with it, or the next element
    AfterMarker {
        marker: String,
        #[serde(default = "default_page")]
        page: u32,
    },
    /// The n-th text element of a page
    Element {
        #[serde(default = "default_page")]
        page: u32,
        #[serde(default)]
        index: usize,
    },
    /// File name without extension
    #[default]
    FileStem,
}

/// How the source document id is formed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceIdRule {
    /// File name without directories
    #[default]
    FileName,
    /// `"{series} {publication_date}"`
    SeriesDate,
}

/// How record page numbers are assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageNumbering {
    /// The page's own 1-based index
    #[default]
    Sequential,
    /// Leading integer of the n-th text element, as in `"3/12"`
    Element { index: usize },
}

impl PageNumbering {
    /// Page number to attribute records on `page` to.
    pub fn number_of(&self, page: &Page) -> u32 {
        match self {
            PageNumbering::Sequential => page.number,
            PageNumbering::Element { index } => page
                .text_elements()
                .nth(*index)
                .and_then(|e| parse_page_number(&e.text_content()))
                .unwrap_or(page.number),
        }
    }
}

fn parse_page_number(text: &str) -> Option<u32> {
    text.split('/').next()?.trim().parse().ok()
}

/// Parse a date found by `pattern` in `text` and re-emit it as `YYYY-MM-DD`.
///
/// The first capture group is used when the pattern has one.
pub fn parse_date(text: &str, pattern: &Regex, format: &str) -> Result<String> {
    let caps = pattern
        .captures(text)
        .ok_or_else(|| Error::DateParse(format!("no date in {text:?}")))?;
    let found = caps
        .get(1)
        .or_else(|| caps.get(0))
        .map(|m| m.as_str())
        .unwrap_or_default();
    let collapsed = found.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDate::parse_from_str(&collapsed, format)
        .map(|d| d.format(ISO_FORMAT).to_string())
        .map_err(|e| Error::DateParse(format!("{collapsed:?} with {format:?}: {e}")))
}

/// Parse a `D:YYYYMMDDHHmmSS+hh'mm'` creation date into `YYYY-MM-DD`.
pub fn parse_creation_date(raw: &str) -> Result<String> {
    let cleaned = raw.trim().trim_start_matches("D:").replace('\'', "");
    if let Ok(dt) = chrono::DateTime::parse_from_str(&cleaned, "%Y%m%d%H%M%S%z") {
        return Ok(dt.format(ISO_FORMAT).to_string());
    }
    let digits: String = cleaned.chars().take(8).collect();
    NaiveDate::parse_from_str(&digits, "%Y%m%d")
        .map(|d| d.format(ISO_FORMAT).to_string())
        .map_err(|e| Error::DateParse(format!("creation date {raw:?}: {e}")))
}

/// Resolves [`Metadata`] for documents of one template.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    series: String,
    date: DateRule,
    date_pattern: Option<Regex>,
    name: NameRule,
    source_id: SourceIdRule,
}

impl MetadataResolver {
    /// Compile the rules. Fails if the date pattern is not a valid regex.
    pub fn new(
        series: impl Into<String>,
        date: DateRule,
        name: NameRule,
        source_id: SourceIdRule,
    ) -> Result<Self> {
        let date_pattern = date
            .pattern()
            .map(Regex::new)
            .transpose()
            .map_err(|e| Error::InvalidProfile(format!("date pattern: {e}")))?;
        Ok(Self {
            series: series.into(),
            date,
            date_pattern,
            name,
            source_id,
        })
    }

    /// Resolve all fields, leaving any that cannot be found empty.
    pub fn resolve(&self, doc: &SourceDocument) -> Metadata {
        let publication_date = self.publication_date(doc).unwrap_or_else(|e| {
            log::debug!("{}: publication date unavailable: {}", doc.file_name, e);
            String::new()
        });
        let document_name = self.document_name(doc).unwrap_or_else(|e| {
            log::debug!("{}: document name unavailable: {}", doc.file_name, e);
            String::new()
        });
        let source_document = self.source_document(doc, &publication_date);
        Metadata {
            publication_date,
            document_name,
            source_document,
        }
    }

    /// Publication date as `YYYY-MM-DD`.
    pub fn publication_date(&self, doc: &SourceDocument) -> Result<String> {
        let pattern = self.date_pattern.as_ref();
        match (&self.date, pattern) {
            (DateRule::Element { page, index, format, .. }, Some(re)) => {
                let element = nth_text(doc.get_page(*page)?, *index)
                    .ok_or_else(|| Error::AnchorNotFound(format!("date element {index} on page {page}")))?;
                parse_date(&element.text_content(), re, format)
            }
            (DateRule::FirstMatch { page, format, .. }, Some(re)) => {
                let text = doc
                    .get_page(*page)?
                    .text_elements()
                    .map(PositionedElement::text_content)
                    .find(|t| re.is_match(t))
                    .ok_or_else(|| Error::AnchorNotFound(format!("date on page {page}")))?;
                parse_date(&text, re, format)
            }
            (DateRule::FileName { format, .. }, Some(re)) => {
                parse_date(&doc.file_stem(), re, format)
            }
            (DateRule::CreationDate, _) => doc
                .creation_date
                .as_deref()
                .ok_or_else(|| Error::AnchorNotFound("creation date".to_string()))
                .and_then(parse_creation_date),
            (_, None) => Err(Error::InvalidProfile("date pattern not compiled".to_string())),
        }
    }

    /// Human-readable document name.
    pub fn document_name(&self, doc: &SourceDocument) -> Result<String> {
        let name = match &self.name {
            NameRule::Color { color, page, skip } => doc
                .get_page(*page)?
                .text_elements()
                .skip(*skip)
                .find(|e| e.has_only_color(color))
                .map(|e| normalize(&e.text_content()).trim().to_string()),
            NameRule::AfterMarker { marker, page } => {
                name_after_marker(doc.get_page(*page)?, marker)
            }
            NameRule::Element { page, index } => nth_text(doc.get_page(*page)?, *index)
                .map(|e| normalize(&e.text_content()).trim().to_string()),
            NameRule::FileStem => Some(doc.file_stem()),
        };
        name.filter(|n| !n.is_empty())
            .ok_or_else(|| Error::AnchorNotFound("document name".to_string()))
    }

    /// Source document id; `date` is the already resolved publication date.
    pub fn source_document(&self, doc: &SourceDocument, date: &str) -> String {
        match self.source_id {
            SourceIdRule::FileName => doc.base_name(),
            SourceIdRule::SeriesDate => format!("{} {}", self.series, date),
        }
    }
}

fn nth_text(page: &Page, index: usize) -> Option<&PositionedElement> {
    page.text_elements().nth(index)
}

fn name_after_marker(page: &Page, marker: &str) -> Option<String> {
    let mut found = false;
    for element in page.text_elements() {
        let text = element.text_content();
        if found {
            return Some(concat_lines(&text).trim().to_string());
        }
        if let Some(rest) = text.strip_prefix(marker) {
            let name = concat_lines(rest).trim().to_string();
            if !name.is_empty() {
                return Some(name);
            }
            found = true;
        }
    }
    None
}
