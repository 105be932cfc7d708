//! Two-column splitting of a page's text elements.
//!
//! Elements are partitioned by the x0 of their bounding box. Two flags are
//! threaded page to page by the caller: whether the section-start anchor has
//! been seen, and whether the current page carries the section-end anchor.

use serde::{Deserialize, Serialize};

use crate::model::{Page, PositionedElement};

/// A rule that recognizes a marker element by its text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anchor {
    /// Element text starts with `text`
    Prefix { text: String },
    /// Element text contains `text`
    Contains { text: String },
    /// Element text starts with `text` set in the given font size (truncated to whole points)
    PrefixWithFontSize { text: String, font_size: f32 },
}

impl Anchor {
    /// Prefix anchor.
    pub fn prefix(text: impl Into<String>) -> Self {
        Anchor::Prefix { text: text.into() }
    }

    /// Containment anchor.
    pub fn contains(text: impl Into<String>) -> Self {
        Anchor::Contains { text: text.into() }
    }

    /// Check if the element is this anchor.
    pub fn matches(&self, element: &PositionedElement) -> bool {
        if !element.is_text() {
            return false;
        }
        let text = element.text_content();
        match self {
            Anchor::Prefix { text: prefix } => text.starts_with(prefix.as_str()),
            Anchor::Contains { text: needle } => text.contains(needle.as_str()),
            Anchor::PrefixWithFontSize {
                text: prefix,
                font_size,
            } => {
                text.starts_with(prefix.as_str())
                    && element
                        .chars()
                        .take(prefix.chars().count())
                        .all(|(_, size, _)| size.trunc() == font_size.trunc())
            }
        }
    }
}

/// Flags carried from one page to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitState {
    /// The section-start anchor has been seen
    pub section_started: bool,
    /// The page just split contains the section-end anchor
    pub last_page: bool,
}

/// Left and right reading-order streams of one page.
#[derive(Debug, Clone, Default)]
pub struct ColumnSplit<'a> {
    /// Elements with x0 below the threshold
    pub left: Vec<&'a PositionedElement>,
    /// Elements with x0 at or above the threshold
    pub right: Vec<&'a PositionedElement>,
}

impl<'a> ColumnSplit<'a> {
    /// Total number of elements in both streams.
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// Check if both streams are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Left stream followed by right stream.
    pub fn into_reading_order(self) -> Vec<&'a PositionedElement> {
        let mut elements = self.left;
        elements.extend(self.right);
        elements
    }
}

/// Splits pages into left/right streams by an x threshold.
#[derive(Debug, Clone)]
pub struct ColumnSplitter {
    threshold: f32,
    element_offset: usize,
    start: Option<Anchor>,
    end: Option<Anchor>,
    content_max_y: Option<f32>,
}

impl ColumnSplitter {
    /// Create a splitter with the given x threshold.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            element_offset: 0,
            start: None,
            end: None,
            content_max_y: None,
        }
    }

    /// Skip the first `offset` elements of every page.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.element_offset = offset;
        self
    }

    /// Exclude everything up to and including the first element matching `anchor`.
    pub fn with_start_anchor(mut self, anchor: Option<Anchor>) -> Self {
        self.start = anchor;
        self
    }

    /// Stop the right stream on the page that contains `anchor`.
    pub fn with_end_anchor(mut self, anchor: Option<Anchor>) -> Self {
        self.end = anchor;
        self
    }

    /// Drop elements whose y0 is at or above `max_y` (running headers).
    pub fn with_content_max_y(mut self, max_y: Option<f32>) -> Self {
        self.content_max_y = max_y;
        self
    }

    /// The x threshold separating the columns.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// State for the first page of a document.
    pub fn initial_state(&self) -> SplitState {
        SplitState {
            section_started: self.start.is_none(),
            last_page: false,
        }
    }

    /// Split one page. `last_page` is recomputed for every page; only
    /// `section_started` carries over.
    pub fn split<'a>(&self, page: &'a Page, state: SplitState) -> (ColumnSplit<'a>, SplitState) {
        let mut split = ColumnSplit::default();
        let mut section_started = state.section_started;
        let mut last_page = false;

        for element in page.elements.iter().skip(self.element_offset) {
            if !element.is_text() {
                continue;
            }

            if self.end.as_ref().is_some_and(|a| a.matches(element)) {
                last_page = true;
                if element.x0() < self.threshold {
                    log::debug!("end anchor in left column on page {}", page.number);
                    break;
                }
            }

            if !section_started {
                section_started = self.start.as_ref().map_or(true, |a| a.matches(element));
                continue;
            }

            if self.content_max_y.is_some_and(|max_y| element.y0() >= max_y) {
                continue;
            }

            if element.x0() < self.threshold {
                split.left.push(element);
            } else if !last_page {
                split.right.push(element);
            }
        }

        (
            split,
            SplitState {
                section_started,
                last_page,
            },
        )
    }
}
