//! Section accumulation: grouping classified elements into `(header, body)` sections.

use serde::{Deserialize, Serialize};

use super::classify::Classified;
use crate::model::{PositionedElement, Section};
use crate::text::normalize;

/// The section still being collected, carried across page boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenSection {
    /// Header of the open section; empty before the first header
    pub header: String,
    /// Body fragments collected so far
    pub parts: Vec<String>,
}

impl OpenSection {
    /// Check if there is anything to flush.
    pub fn is_open(&self) -> bool {
        !self.header.is_empty() || !self.parts.is_empty()
    }

    fn flush(&mut self) -> Option<(String, String)> {
        if !self.is_open() {
            return None;
        }
        let header = std::mem::take(&mut self.header);
        let body = normalize(&std::mem::take(&mut self.parts).concat());
        Some((header, body))
    }
}

/// Feed classified elements through the accumulator state machine.
///
/// Returns the sections flushed while consuming `elements` and the section
/// left open at the end, to be passed back in with the next page.
pub fn accumulate(
    elements: impl IntoIterator<Item = Classified>,
    mut carry: OpenSection,
) -> (Vec<(String, String)>, OpenSection) {
    let mut flushed = Vec::new();
    for element in elements {
        if !element.header.is_empty() {
            flushed.extend(carry.flush());
            carry.header = element.header;
        }
        if !element.body.is_empty() {
            carry.parts.push(element.body);
        }
    }
    (flushed, carry)
}

/// Stateful accumulator producing [`Section`]s for one document.
#[derive(Debug, Clone, Default)]
pub struct SectionAccumulator {
    title: String,
    open: OpenSection,
    sections: Vec<Section>,
}

impl SectionAccumulator {
    /// Create an accumulator whose sections carry `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Feed the classified elements of one page.
    pub fn push_page(&mut self, elements: impl IntoIterator<Item = Classified>, page_number: u32) {
        let (flushed, open) = accumulate(elements, std::mem::take(&mut self.open));
        self.open = open;
        self.sections.extend(
            flushed
                .into_iter()
                .map(|(header, body)| Section::new(self.title.clone(), header, body, page_number)),
        );
    }

    /// The currently open section.
    pub fn open_section(&self) -> &OpenSection {
        &self.open
    }

    /// Flush the open section and return all sections in order.
    pub fn finish(mut self, page_number: u32) -> Vec<Section> {
        if let Some((header, body)) = self.open.flush() {
            self.sections
                .push(Section::new(self.title, header, body, page_number));
        }
        self.sections
    }
}

/// Append header-less sections to the nearest preceding headed section.
///
/// Header-less sections before the first header are kept as they are.
pub fn merge_headerless(sections: Vec<Section>) -> Vec<Section> {
    let mut merged: Vec<Section> = Vec::with_capacity(sections.len());
    let mut last_headed: Option<usize> = None;
    for section in sections {
        match last_headed {
            Some(i) if section.header.is_empty() => merged[i].body.push_str(&section.body),
            _ => {
                if !section.header.is_empty() {
                    last_headed = Some(merged.len());
                }
                merged.push(section);
            }
        }
    }
    merged
}

/// A run of elements to skip, such as a chart and its caption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipBlock {
    /// Prefixes that open the block
    pub start: Vec<String>,
    /// Prefixes that close the block; the closing element is skipped too
    pub end: Vec<String>,
}

/// Per-page element filter for excluded prefixes and skip blocks.
#[derive(Debug)]
pub struct BlockFilter<'p> {
    exclude_prefixes: &'p [String],
    skip_block: Option<&'p SkipBlock>,
    in_block: bool,
}

impl<'p> BlockFilter<'p> {
    /// Create a filter; state starts fresh on every page.
    pub fn new(exclude_prefixes: &'p [String], skip_block: Option<&'p SkipBlock>) -> Self {
        Self {
            exclude_prefixes,
            skip_block,
            in_block: false,
        }
    }

    /// Check if the element should reach the classifier.
    pub fn admit(&mut self, element: &PositionedElement) -> bool {
        let text = element.text_content();
        if let Some(block) = self.skip_block {
            if !self.in_block {
                self.in_block = block.start.iter().any(|p| text.starts_with(p.as_str()));
            }
            if block.end.iter().any(|p| text.starts_with(p.as_str())) {
                self.in_block = false;
                return false;
            }
            if self.in_block {
                return false;
            }
        }
        !self
            .exclude_prefixes
            .iter()
            .any(|p| text.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Color};

    fn header(h: &str) -> Classified {
        Classified {
            header: h.to_string(),
            ..Default::default()
        }
    }

    fn body(b: &str) -> Classified {
        Classified {
            body: b.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_headers_single_section() {
        let (flushed, open) = accumulate(vec![body("a"), body("b")], OpenSection::default());
        assert!(flushed.is_empty());
        let mut acc = SectionAccumulator::new("T");
        acc.push_page(vec![body("a"), body("b")], 1);
        let sections = acc.finish(1);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].header, "");
        assert_eq!(sections[0].body, "ab");
        assert_eq!(open.parts, vec!["a", "b"]);
    }

    #[test]
    fn test_header_transitions() {
        let mut acc = SectionAccumulator::new("T");
        acc.push_page(vec![header("Risks"), body("r1"), header("Profile"), body("p1")], 2);
        let sections = acc.finish(2);
        let pairs: Vec<_> = sections
            .iter()
            .map(|s| (s.header.as_str(), s.body.as_str()))
            .collect();
        assert_eq!(pairs, vec![("Risks", "r1"), ("Profile", "p1")]);
    }

    #[test]
    fn test_section_spans_pages() {
        let mut acc = SectionAccumulator::new("T");
        acc.push_page(vec![header("Outlook"), body("first half ")], 1);
        assert_eq!(acc.open_section().header, "Outlook");
        acc.push_page(vec![body("second half"), header("Next"), body("x")], 2);
        let sections = acc.finish(3);
        assert_eq!(sections[0].body, "first half second half");
        assert_eq!(sections[0].page_number, 2);
        assert_eq!(sections[1].page_number, 3);
    }

    #[test]
    fn test_header_with_inline_body_and_consecutive_headers() {
        let element = Classified {
            header: "Equities".to_string(),
            body: "We stay overweight.".to_string(),
            reverted: false,
        };
        let (flushed, open) =
            accumulate(vec![header("Empty"), element], OpenSection::default());
        assert_eq!(flushed, vec![("Empty".to_string(), String::new())]);
        assert_eq!(open.header, "Equities");
        assert_eq!(open.parts, vec!["We stay overweight."]);
    }

    #[test]
    fn test_flush_completeness() {
        let input = vec![
            body("lead "),
            header("A"),
            body("a1"),
            body("a2"),
            header("B"),
            header("C"),
            body("c1"),
        ];
        let total_in: usize = input.iter().map(|c| c.body.len()).sum();
        let mut acc = SectionAccumulator::new("");
        acc.push_page(input, 1);
        let total_out: usize = acc.finish(1).iter().map(|s| s.body.len()).sum();
        assert_eq!(total_in, total_out);
    }

    #[test]
    fn test_merge_headerless() {
        let sections = vec![
            Section::new("", "", "lead", 1),
            Section::new("", "A", "a", 1),
            Section::new("", "", " more a", 2),
            Section::new("", "B", "b", 2),
        ];
        let merged = merge_headerless(sections);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].body, "lead");
        assert_eq!(merged[1].body, "a more a");
        assert_eq!(merged[2].header, "B");
    }

    #[test]
    fn test_block_filter() {
        let el = |t: &str| PositionedElement::text(BBox::default(), t, 9.0, Color::black());
        let block = SkipBlock {
            start: vec!["Chart".to_string()],
            end: vec!["Source:".to_string(), "Note:".to_string()],
        };
        let exclude = vec!["Source:".to_string()];
        let mut filter = BlockFilter::new(&exclude, Some(&block));

        let admitted: Vec<bool> = ["Body", "Chart 1: Yields", "axis", "Note: data", "After", "Source: X"]
            .iter()
            .map(|t| filter.admit(&el(t)))
            .collect();
        assert_eq!(admitted, vec![true, false, false, false, true, false]);
    }
}
