//! Header/body classification of a text element.
//!
//! Classification is prefix based: characters that satisfy the header rule
//! are collected into the header until the first visible character that does
//! not. Everything from there on is body. Whitespace takes the state of the
//! character before it, so the split never falls inside a `-\n` pair and
//! `normalize(header) + normalize(body) == normalize(text)` holds.

use serde::{Deserialize, Serialize};

use crate::model::{Color, PositionedElement};
use crate::text::normalize;

/// Predicate deciding whether a character belongs to a header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HeaderRule {
    /// Header characters have one of `colors` (or none of them when `negate` is set)
    Color {
        colors: Vec<Color>,
        #[serde(default)]
        negate: bool,
    },
    /// Header characters are at least `threshold` points (strictly below it, when `inverted`)
    FontSize {
        threshold: f32,
        #[serde(default)]
        inverted: bool,
    },
    /// The whole element is a header if all its cased letters are uppercase
    Uppercase,
}

impl HeaderRule {
    /// Header when the character has one of the given colors.
    pub fn color(colors: Vec<Color>) -> Self {
        HeaderRule::Color {
            colors,
            negate: false,
        }
    }

    /// Header when the character is at least `threshold` points.
    pub fn font_size(threshold: f32) -> Self {
        HeaderRule::FontSize {
            threshold,
            inverted: false,
        }
    }

    /// Check if a single character is header print.
    pub fn is_header_char(&self, font_size: f32, color: &Color) -> bool {
        match self {
            HeaderRule::Color { colors, negate } => {
                colors.iter().any(|c| c.matches(color)) != *negate
            }
            HeaderRule::FontSize {
                threshold,
                inverted,
            } => {
                if *inverted {
                    font_size < *threshold
                } else {
                    font_size >= *threshold
                }
            }
            HeaderRule::Uppercase => false,
        }
    }
}

impl Default for HeaderRule {
    fn default() -> Self {
        HeaderRule::font_size(12.0)
    }
}

/// Result of classifying one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Normalized header prefix; empty if the element starts with body print
    pub header: String,
    /// Normalized remainder
    pub body: String,
    /// A header character appeared after the body had started
    pub reverted: bool,
}

/// Splits elements into header and body by a [`HeaderRule`].
#[derive(Debug, Clone, Default)]
pub struct HeaderClassifier {
    rule: HeaderRule,
}

impl HeaderClassifier {
    /// Create a classifier for the given rule.
    pub fn new(rule: HeaderRule) -> Self {
        Self { rule }
    }

    /// The rule in use.
    pub fn rule(&self) -> &HeaderRule {
        &self.rule
    }

    /// Classify an element into header prefix and body remainder.
    pub fn classify(&self, element: &PositionedElement) -> Classified {
        if self.rule == HeaderRule::Uppercase {
            return classify_uppercase(element);
        }

        let mut header = String::new();
        let mut body = String::new();
        let mut in_header = true;
        let mut reverted = false;

        for (c, size, color) in element.chars() {
            let is_header = self.rule.is_header_char(size, color);
            if in_header {
                if c.is_whitespace() || is_header {
                    header.push(c);
                } else {
                    in_header = false;
                    body.push(c);
                }
            } else {
                if !c.is_whitespace() && is_header {
                    reverted = true;
                }
                body.push(c);
            }
        }

        if header.trim().is_empty() {
            body = std::mem::take(&mut header) + &body;
        }

        if reverted {
            log::warn!(
                "header print after body start in element at ({:.1}, {:.1}); kept as body",
                element.x0(),
                element.y0()
            );
        }

        Classified {
            header: normalize(&header),
            body: normalize(&body),
            reverted,
        }
    }
}

fn classify_uppercase(element: &PositionedElement) -> Classified {
    let text = normalize(&element.text_content());
    let has_cased = text.chars().any(|c| c.is_lowercase() || c.is_uppercase());
    if has_cased && !text.chars().any(char::is_lowercase) {
        Classified {
            header: text,
            ..Default::default()
        }
    } else {
        Classified {
            body: text,
            ..Default::default()
        }
    }
}
