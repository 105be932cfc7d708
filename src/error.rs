//! Error types for docseg library.

use std::io;
use thiserror::Error;

/// Result type alias for docseg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document segmentation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading profiles or page dumps.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A document profile is inconsistent or contains an invalid pattern.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// A metadata or section anchor was not present in the document.
    #[error("Anchor not found: {0}")]
    AnchorNotFound(String),

    /// A date string did not match the expected format.
    #[error("Date parse error: {0}")]
    DateParse(String),

    /// The table region contains no rows to build a grid from.
    #[error("Table region contains no rows")]
    EmptyTable,

    /// The document has no pages.
    #[error("Document has no pages")]
    EmptyDocument,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// The embedding collaborator rejected a request.
    #[error("Embedding error: {0}")]
    Embedding(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyTable;
        assert_eq!(err.to_string(), "Table region contains no rows");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::AnchorNotFound("title color".to_string());
        assert_eq!(err.to_string(), "Anchor not found: title color");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
