//! Text normalization for extracted element text.
//!
//! Steps, in order: join fragments, remove `-\n` hyphenation, remove line
//! breaks, drop control/format/private-use characters, and optionally
//! truncate at the earliest stop phrase. Every step is idempotent, so
//! `normalize(normalize(s)) == normalize(s)`.

use super::StopTrie;

/// Result of normalizing with stop-phrase truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    /// Normalized (and possibly truncated) text
    pub text: String,
    /// Whether a stop phrase was found and the text truncated
    pub early_stop: bool,
}

/// Normalizer with an optional stop-list.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    stop: StopTrie,
}

impl TextCleaner {
    /// Create a cleaner that truncates at any of `stop_strings`.
    pub fn new<S: AsRef<str>>(stop_strings: &[S]) -> Self {
        Self {
            stop: StopTrie::new(stop_strings),
        }
    }

    /// Create a cleaner without a stop-list.
    pub fn plain() -> Self {
        let none: [&str; 0] = [];
        Self::new(&none)
    }

    /// Normalize a single text.
    pub fn clean(&self, text: &str) -> String {
        normalize(text)
    }

    /// Join and normalize a sequence of fragments.
    pub fn clean_parts<S: AsRef<str>>(&self, parts: &[S]) -> String {
        normalize(&join(parts))
    }

    /// Normalize and truncate at the earliest stop phrase.
    pub fn clean_with_stop(&self, text: &str) -> Cleaned {
        let mut text = normalize(text);
        let early_stop = match self.stop.first_match(&text) {
            Some(pos) => {
                text.truncate(pos);
                true
            }
            None => false,
        };
        Cleaned { text, early_stop }
    }

    /// Join, normalize, and truncate a sequence of fragments.
    pub fn clean_parts_with_stop<S: AsRef<str>>(&self, parts: &[S]) -> Cleaned {
        self.clean_with_stop(&join(parts))
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::plain()
    }
}

fn join<S: AsRef<str>>(parts: &[S]) -> String {
    parts.iter().map(|p| p.as_ref()).collect()
}

/// Normalize text: de-hyphenate, join lines, drop control characters.
pub fn normalize(text: &str) -> String {
    let text = remove_hyphenation(text);
    let text = concat_lines(&text);
    remove_control_chars(&text)
}

/// Remove a hyphen immediately followed by a line break.
pub fn remove_hyphenation(text: &str) -> String {
    text.replace("-\n", "")
}

/// Remove all line breaks.
pub fn concat_lines(text: &str) -> String {
    text.replace('\n', "")
}

/// Drop characters in the control, format, private-use, and noncharacter categories.
pub fn remove_control_chars(text: &str) -> String {
    text.chars().filter(|c| !is_control_or_format(*c)).collect()
}

/// Check if a text consists only of digits, whitespace, and ASCII punctuation.
pub fn is_non_text(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || c.is_ascii_punctuation())
}

/// Check if a character belongs to one of the "other" general categories.
///
/// Covers Cc, Cf, Co, Cs (never a `char`) and the noncharacters of Cn.
/// Unassigned code points such as U+0378 are kept.
pub fn is_control_or_format(c: char) -> bool {
    c.is_control() || is_format(c) || is_private_use(c) || is_noncharacter(c)
}

fn is_format(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x0890..=0x0891
            | 0x08E2
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
            | 0x110BD
            | 0x110CD
            | 0x13430..=0x1343F
            | 0x1BCA0..=0x1BCA3
            | 0x1D173..=0x1D17A
            | 0xE0001
            | 0xE0020..=0xE007F
    )
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

fn is_noncharacter(c: char) -> bool {
    let code = c as u32;
    (0xFDD0..=0xFDEF).contains(&code) || (code & 0xFFFE) == 0xFFFE
}
