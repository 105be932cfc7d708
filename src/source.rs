//! Page sources: where positioned page content comes from.
//!
//! Geometry extraction itself happens outside this crate. Any engine that can
//! produce a [`SourceDocument`] implements [`PageSource`]; the bundled
//! [`JsonPageSource`] reads page dumps serialized with `serde_json`.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::SourceDocument;

/// Trait for page sources.
///
/// Implement this trait to connect a geometry-extraction engine.
pub trait PageSource: Send + Sync {
    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Get the supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Load a document from a file.
    fn load(&self, path: &Path) -> Result<SourceDocument>;

    /// Load a document from bytes.
    fn load_bytes(&self, bytes: &[u8], file_name: &str) -> Result<SourceDocument>;

    /// Check if this source handles the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Reads JSON page dumps (a serialized [`SourceDocument`]).
///
/// When the dump has no `file_name`, the file's own name is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPageSource;

impl JsonPageSource {
    /// Create a new JSON page source.
    pub fn new() -> Self {
        Self
    }
}

impl PageSource for JsonPageSource {
    fn name(&self) -> &str {
        "json"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load(&self, path: &Path) -> Result<SourceDocument> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.load_bytes(&bytes, &file_name)
    }

    fn load_bytes(&self, bytes: &[u8], file_name: &str) -> Result<SourceDocument> {
        let mut doc: SourceDocument = serde_json::from_slice(bytes)?;
        if doc.file_name.is_empty() {
            doc.file_name = file_name.to_string();
        }
        log::debug!("loaded {} with {} pages", doc.file_name, doc.pages.len());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Color, Page, PositionedElement};
    use std::io::Write;

    #[test]
    fn test_load_dump_from_file() {
        let doc = SourceDocument::new(
            "Weekly 2024-05-16.pdf",
            vec![Page::with_elements(
                1,
                vec![PositionedElement::text(
                    BBox::new(10.0, 700.0, 200.0, 712.0),
                    "Hello",
                    9.0,
                    Color::named("DeviceRGB"),
                )],
            )],
        );
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(serde_json::to_string(&doc).unwrap().as_bytes())
            .unwrap();

        let loaded = JsonPageSource::new().load(file.path()).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_missing_file_name_taken_from_path() {
        let json = r#"{"file_name": "", "pages": [{"number": 1, "elements": [
            {"bbox": {"x0": 0, "y0": 0, "x1": 100, "y1": 1}, "kind": "line"}
        ]}]}"#;
        let doc = JsonPageSource::new().load_bytes(json.as_bytes(), "dump.json").unwrap();
        assert_eq!(doc.file_name, "dump.json");
        assert!(doc.pages[0].elements[0].is_line());
    }

    #[test]
    fn test_supports_extension() {
        let source = JsonPageSource::new();
        assert!(source.supports_extension("JSON"));
        assert!(!source.supports_extension("pdf"));
    }

    #[test]
    fn test_invalid_dump() {
        assert!(JsonPageSource::new().load_bytes(b"not json", "x.json").is_err());
    }
}
