//! Text normalization and stop-phrase search.

mod cleanup;
mod stop;

pub use cleanup::{
    concat_lines, is_control_or_format, is_non_text, normalize, remove_control_chars,
    remove_hyphenation, Cleaned, TextCleaner,
};
pub use stop::StopTrie;
