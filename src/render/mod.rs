//! Rendering of records, batch reports and tables.

mod json;
mod text;

pub use json::{report_to_json, table_to_json, to_json, JsonFormat};
pub use text::{table_to_text, to_text};
