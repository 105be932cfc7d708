//! Embedding hand-off: annotated section text and a retrying embedder call.
//!
//! The vector model itself lives outside this crate behind [`Embedder`].

use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::DocumentRecord;

/// A text-embedding service.
pub trait Embedder: Send + Sync {
    /// Embed one text.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Fixed-backoff retry policy for embedding requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts before giving up
    pub max_attempts: u32,
    /// Pause after each failed attempt
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Set the number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the backoff between attempts.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }
}

/// A record together with its annotated text and embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRecord {
    #[serde(flatten)]
    pub record: DocumentRecord,
    pub section_text_with_metadata: String,
    /// Empty when every attempt failed
    pub section_text_with_metadata_embedding: Vec<f32>,
}

/// Annotated text sent to the embedder for one record.
pub fn annotate(record: &DocumentRecord) -> String {
    format!(
        "publication_date: {}\nseries: {}\ndocument_name: {}\nsection_header: {}\n{}",
        record.publication_date,
        record.series,
        record.document_name,
        record.section_header,
        record.section_text
    )
}

/// Call the embedder until it succeeds or the policy is exhausted.
///
/// Returns an empty vector when every attempt failed.
pub fn embed_with_retry<E: Embedder + ?Sized>(embedder: &E, text: &str, policy: &RetryPolicy) -> Vec<f32> {
    for attempt in 1..=policy.max_attempts {
        match embedder.embed(text) {
            Ok(vector) => return vector,
            Err(e) => {
                log::warn!(
                    "embedding attempt {}/{} failed: {}",
                    attempt,
                    policy.max_attempts,
                    e
                );
                if attempt < policy.max_attempts {
                    thread::sleep(policy.backoff);
                }
            }
        }
    }
    Vec::new()
}

/// Annotate and embed every record, in order.
pub fn embed_records<E: Embedder + ?Sized>(
    records: Vec<DocumentRecord>,
    embedder: &E,
    policy: &RetryPolicy,
) -> Vec<EmbeddedRecord> {
    records
        .into_iter()
        .map(|record| {
            let text = annotate(&record);
            let embedding = embed_with_retry(embedder, &text, policy);
            EmbeddedRecord {
                record,
                section_text_with_metadata: text,
                section_text_with_metadata_embedding: embedding,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{Metadata, Section};
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl Embedder for Flaky {
        fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(Error::Embedding("service unavailable".to_string()))
            } else {
                Ok(vec![text.len() as f32])
            }
        }
    }

    fn record() -> DocumentRecord {
        let metadata = Metadata {
            publication_date: "2024-05-16".to_string(),
            document_name: "Weekly".to_string(),
            source_document: "weekly.pdf".to_string(),
        };
        DocumentRecord::from_section(&Section::new("T", "Risks", "Rates.", 2), &metadata, "CIO")
    }

    fn quick(attempts: u32) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(attempts)
            .with_backoff(Duration::ZERO)
    }

    #[test]
    fn test_annotation_format() {
        assert_eq!(
            annotate(&record()),
            "publication_date: 2024-05-16\nseries: CIO\ndocument_name: Weekly\nsection_header: Risks\nRates."
        );
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.backoff, Duration::from_secs(2));
    }

    #[test]
    fn test_retry_then_success() {
        let embedder = Flaky {
            failures: 3,
            calls: AtomicU32::new(0),
        };
        let vector = embed_with_retry(&embedder, "abc", &quick(10));
        assert_eq!(vector, vec![3.0]);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_exhausted_returns_empty() {
        let embedder = Flaky {
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        };
        let embedded = embed_records(vec![record()], &embedder, &quick(10));
        assert!(embedded[0].section_text_with_metadata_embedding.is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 10);

        let json = serde_json::to_value(&embedded[0]).unwrap();
        assert_eq!(json["section_header"], "Risks");
        assert!(json["section_text_with_metadata"].as_str().unwrap().ends_with("Rates."));
    }
}
