//! Removal of trailing small-print elements (footers, disclaimers).

use crate::model::PositionedElement;

/// Drops the contiguous tail of footer elements from a column.
#[derive(Debug, Clone, Copy)]
pub struct FooterTrimmer {
    threshold: f32,
}

impl FooterTrimmer {
    /// Create a trimmer; characters whose size truncated to whole points is at
    /// or below `threshold` are footer print (6.9pt counts as 6).
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// An element is a footer if every visible character is at or below the
    /// threshold (font sizes truncated to whole points).
    pub fn is_footer(&self, element: &PositionedElement) -> bool {
        element
            .chars()
            .filter(|(c, _, _)| !c.is_whitespace())
            .all(|(_, size, _)| size.trunc() <= self.threshold)
    }

    /// Pop footer elements off the end until a non-footer element is reached.
    pub fn trim<'a>(&self, mut elements: Vec<&'a PositionedElement>) -> Vec<&'a PositionedElement> {
        while elements.last().is_some_and(|e| self.is_footer(e)) {
            elements.pop();
        }
        elements
    }
}
