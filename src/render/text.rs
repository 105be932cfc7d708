//! Plain text rendering for records and tables.

use crate::model::{DocumentRecord, Table};

/// Render records as readable blocks, one per section.
pub fn to_text(records: &[DocumentRecord]) -> String {
    let mut output = String::new();
    for record in records {
        output.push_str(&format!("[{} p.{}]", record.source_document, record.page_number));
        if !record.section_header.is_empty() {
            output.push(' ');
            output.push_str(&record.section_header);
        }
        output.push('\n');
        output.push_str(&record.section_text);
        output.push_str("\n\n");
    }
    output.trim_end().to_string()
}

/// Render a table tab-separated, one row per line.
pub fn table_to_text(table: &Table) -> String {
    table.plain_text()
}
