//! JSON rendering for records, batch reports and tables.

use serde::Serialize;

use crate::error::Result;
use crate::model::{DocumentRecord, Table};
use crate::pipeline::BatchReport;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn render<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(json)
}

/// Convert records to a JSON array.
pub fn to_json(records: &[DocumentRecord], format: JsonFormat) -> Result<String> {
    render(records, format)
}

/// Convert a batch report (records and failures) to JSON.
pub fn report_to_json(report: &BatchReport, format: JsonFormat) -> Result<String> {
    render(report, format)
}

/// Convert a table to JSON.
pub fn table_to_json(table: &Table, format: JsonFormat) -> Result<String> {
    render(table, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Metadata, Section};

    fn records() -> Vec<DocumentRecord> {
        let metadata = Metadata {
            publication_date: "2024-05-16".to_string(),
            document_name: "Weekly".to_string(),
            source_document: "weekly.pdf".to_string(),
        };
        vec![DocumentRecord::from_section(
            &Section::new("Weekly", "Risks", "", 1),
            &metadata,
            "CIO",
        )]
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&records(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"section_header\": \"Risks\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&records(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"section_text\":\"\""));
    }

    #[test]
    fn test_report_to_json() {
        let mut report = BatchReport::default();
        report.push("a.pdf", Ok(records()));
        report.push("b.pdf", Err(crate::Error::EmptyDocument));
        let value: serde_json::Value =
            serde_json::from_str(&report_to_json(&report, JsonFormat::Compact).unwrap()).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 1);
        assert_eq!(value["failures"][0]["file_name"], "b.pdf");
        assert_eq!(value["failures"][0]["reason"], "Document has no pages");
    }

    #[test]
    fn test_table_to_json() {
        let table = Table::new(vec![vec!["a".into(), "b".into()]]).with_header();
        let json = table_to_json(&table, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"has_index\":true"));
    }
}
