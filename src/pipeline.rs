//! Profile-driven processing of documents and batches.
//!
//! Within a document, pages are processed strictly in order because the
//! column state and the open section carry from page to page. Documents in a
//! batch share nothing but the read-only profile and run on the rayon pool
//! when the `parallel` feature is enabled.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{DocumentRecord, Metadata, Section, SourceDocument};
use crate::profile::{DocumentProfile, SegmentationMode};
use crate::segment::{
    merge_headerless, BlockFilter, ColumnSplitter, FooterTrimmer, HeaderClassifier,
    MetadataResolver, SectionAccumulator,
};
use crate::source::PageSource;
use crate::text::{is_non_text, TextCleaner};

/// Runs one profile over documents.
#[derive(Debug)]
pub struct Segmenter<'p> {
    profile: &'p DocumentProfile,
    splitter: ColumnSplitter,
    trimmer: FooterTrimmer,
    classifier: HeaderClassifier,
    cleaner: TextCleaner,
    resolver: MetadataResolver,
}

impl<'p> Segmenter<'p> {
    /// Validate the profile and build the processing steps.
    pub fn new(profile: &'p DocumentProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            profile,
            splitter: profile.splitter(),
            trimmer: profile.footer_trimmer(),
            classifier: profile.classifier(),
            cleaner: profile.cleaner(),
            resolver: profile.metadata_resolver()?,
        })
    }

    /// The profile in use.
    pub fn profile(&self) -> &DocumentProfile {
        self.profile
    }

    /// Resolve document metadata; missing fields are empty.
    pub fn metadata(&self, doc: &SourceDocument) -> Metadata {
        self.resolver.resolve(doc)
    }

    /// Segment a document into records.
    pub fn process(&self, doc: &SourceDocument) -> Result<Vec<DocumentRecord>> {
        if doc.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let metadata = self.metadata(doc);
        let sections = match self.profile.mode {
            SegmentationMode::Sections => {
                let title = self
                    .profile
                    .section_title
                    .clone()
                    .unwrap_or_else(|| metadata.document_name.clone());
                self.sections(doc, &title)
            }
            SegmentationMode::PageText => {
                let title = self.profile.section_title.clone().unwrap_or_default();
                self.page_sections(doc, &title)
            }
        };

        log::debug!("{}: {} sections", doc.file_name, sections.len());
        Ok(sections
            .iter()
            .map(|s| DocumentRecord::from_section(s, &metadata, &self.profile.series))
            .collect())
    }

    /// Two-column header/body segmentation.
    pub fn sections(&self, doc: &SourceDocument, title: &str) -> Vec<Section> {
        let mut state = self.splitter.initial_state();
        let mut accumulator = SectionAccumulator::new(title);
        let mut last_number = 0;

        for page in &doc.pages {
            let (split, next) = self.splitter.split(page, state);
            state = next;

            let left = self.trimmer.trim(split.left);
            let right = self.trimmer.trim(split.right);
            let mut filter = BlockFilter::new(
                &self.profile.exclude_prefixes,
                self.profile.skip_block.as_ref(),
            );
            let page_number = self.profile.page_numbering.number_of(page);

            let classified = left
                .into_iter()
                .chain(right)
                .filter(|e| filter.admit(e))
                .map(|e| self.classifier.classify(e));
            accumulator.push_page(classified, page_number);
            last_number = page_number;

            if state.last_page {
                log::debug!("{}: end anchor on page {}", doc.file_name, page.number);
                break;
            }
        }

        let sections = self.truncate_at_stop(accumulator.finish(last_number));
        if self.profile.merge_headerless {
            merge_headerless(sections)
        } else {
            sections
        }
    }

    /// One section per page made of the page's prose text.
    pub fn page_sections(&self, doc: &SourceDocument, title: &str) -> Vec<Section> {
        let mut sections = Vec::with_capacity(doc.pages.len());
        for page in &doc.pages {
            let texts: Vec<String> = page
                .text_elements()
                .map(|e| e.text_content())
                .filter(|t| !is_non_text(t))
                .collect();
            let cleaned = self.cleaner.clean_parts_with_stop(&texts);
            let page_number = self.profile.page_numbering.number_of(page);
            sections.push(Section::new(title, "", cleaned.text, page_number));

            if cleaned.early_stop {
                log::debug!("{}: stop phrase on page {}", doc.file_name, page.number);
                break;
            }
        }
        sections
    }

    fn truncate_at_stop(&self, sections: Vec<Section>) -> Vec<Section> {
        if self.profile.stop_strings.is_empty() {
            return sections;
        }
        let mut kept = Vec::with_capacity(sections.len());
        for mut section in sections {
            let cleaned = self.cleaner.clean_with_stop(&section.body);
            section.body = cleaned.text;
            kept.push(section);
            if cleaned.early_stop {
                break;
            }
        }
        kept
    }
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    /// Original file name
    pub file_name: String,
    /// Error description
    pub reason: String,
}

/// Outcome of a batch: records of successful documents and the failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub records: Vec<DocumentRecord>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// Add the outcome of one document.
    pub fn push(&mut self, file_name: impl Into<String>, outcome: Result<Vec<DocumentRecord>>) {
        match outcome {
            Ok(records) => self.records.extend(records),
            Err(e) => {
                let file_name = file_name.into();
                log::warn!("{} could not be processed: {}", file_name, e);
                self.failures.push(DocumentFailure {
                    file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Check if every document succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

type Outcome = (String, Result<Vec<DocumentRecord>>);

fn run_all<T, F>(items: &[T], parallel: bool, f: F) -> BatchReport
where
    T: Sync,
    F: Fn(&T) -> Outcome + Sync + Send,
{
    let outcomes: Vec<Outcome> = {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                use rayon::prelude::*;
                items.par_iter().map(&f).collect()
            } else {
                items.iter().map(&f).collect()
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            let _ = parallel;
            items.iter().map(&f).collect()
        }
    };

    let mut report = BatchReport::default();
    for (file_name, outcome) in outcomes {
        report.push(file_name, outcome);
    }
    report
}

/// Process documents with one profile. Only an invalid profile is an error;
/// per-document failures go into the report.
pub fn process_batch(
    docs: &[SourceDocument],
    profile: &DocumentProfile,
    parallel: bool,
) -> Result<BatchReport> {
    let segmenter = Segmenter::new(profile)?;
    Ok(run_all(docs, parallel, |doc| {
        (doc.file_name.clone(), segmenter.process(doc))
    }))
}

/// Load and process files through a page source.
pub fn process_paths<S, P>(
    source: &S,
    paths: &[P],
    profile: &DocumentProfile,
    parallel: bool,
) -> Result<BatchReport>
where
    S: PageSource + ?Sized,
    P: AsRef<Path> + Sync,
{
    let segmenter = Segmenter::new(profile)?;
    Ok(run_all(paths, parallel, |path| {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let outcome = source.load(path).and_then(|doc| segmenter.process(&doc));
        (file_name, outcome)
    }))
}
