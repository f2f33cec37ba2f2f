//! Core types and the batch driver for README fact extraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config_file;
pub mod discover;
pub mod runner;
pub mod sample;

pub use backend::{BackendError, PdfBackend};
pub use discover::discover_files;
pub use runner::{ProcessFn, run_batch};
pub use sample::{select_sample, write_manifest};

/// Which surface pattern produced a temporal mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalKind {
    /// A bare four-digit year ("2019").
    SingleYear,
    /// Two years joined by a dash ("2010-2019").
    YearRange,
    /// A month name followed by a year ("September 2020").
    MonthYear,
}

/// One data-collection-period mention found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalMention {
    /// Canonical surface form ("2010-2019", "September 2020", "2019").
    pub value: String,
    pub kind: TemporalKind,
}

impl TemporalMention {
    pub fn new(value: impl Into<String>, kind: TemporalKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

/// Which surface pattern produced a dataset candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetForm {
    /// Quoted title with a dataset keyword nearby.
    Quoted,
    /// Capitalized phrase following a dataset keyword.
    Keyword,
    /// Data file name with a known extension.
    Filename,
}

/// One candidate dataset name found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetCandidate {
    pub name: String,
    pub form: DatasetForm,
}

impl DatasetCandidate {
    pub fn new(name: impl Into<String>, form: DatasetForm) -> Self {
        Self {
            name: name.into(),
            form,
        }
    }
}

/// Everything extracted from one document. One record per input file, in
/// input order, whether or not processing succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRecord {
    /// Input file name (not the full path).
    pub file: String,
    /// First certification sentence, capped at 400 characters.
    pub declaration: Option<String>,
    /// Text of the located availability/sources section, header included.
    pub availability_section: Option<String>,
    pub dataset_candidates: Vec<DatasetCandidate>,
    pub time_mentions: Vec<TemporalMention>,
    pub urls: Vec<String>,
    /// Canonical institution labels, document order.
    pub source_mentions: Vec<String>,
    /// Low-evidence flag: the record should be checked by a human.
    pub needs_review: bool,
    /// Why processing failed, when it did.
    pub error: Option<String>,
}

impl ExtractionRecord {
    /// Record for a document that could not be processed. Collections stay
    /// empty and the record is flagged for review.
    pub fn failed(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            declaration: None,
            availability_section: None,
            dataset_candidates: Vec::new(),
            time_mentions: Vec::new(),
            urls: Vec::new(),
            source_mentions: Vec::new(),
            needs_review: true,
            error: Some(error.into()),
        }
    }
}

/// Aggregate counters for one batch run. Updated by a single writer after
/// all per-document work has completed.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub processed: usize,
    pub errors: usize,
    pub needs_review: usize,
    pub with_declaration: usize,
    pub with_section: usize,
    pub dataset_mentions: usize,
    pub time_mentions: usize,
    pub url_mentions: usize,
    pub source_mentions: usize,
}

impl RunStats {
    /// Fold one record into the counters.
    pub fn record(&mut self, record: &ExtractionRecord) {
        self.processed += 1;
        if record.error.is_some() {
            self.errors += 1;
        }
        if record.needs_review {
            self.needs_review += 1;
        }
        if record.declaration.is_some() {
            self.with_declaration += 1;
        }
        if record.availability_section.is_some() {
            self.with_section += 1;
        }
        self.dataset_mentions += record.dataset_candidates.len();
        self.time_mentions += record.time_mentions.len();
        self.url_mentions += record.urls.len();
        self.source_mentions += record.source_mentions.len();
    }
}

/// Progress callback events emitted during a batch run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A worker picked up a document.
    Processing {
        index: usize,
        total: usize,
        file: String,
    },
    /// A document finished, successfully or not.
    Completed {
        index: usize,
        total: usize,
        record: Box<ExtractionRecord>,
    },
}

/// Subset selection strategy when a sample cap limits the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleMode {
    /// Seeded draw without replacement.
    #[default]
    Random,
    /// Prefix of the sorted discovery list.
    First,
}

/// Resolved settings for one batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Concurrent document workers.
    pub num_workers: usize,
    /// Cap on the number of files to process; 0 means no cap.
    pub max_samples: usize,
    pub sample_mode: SampleMode,
    /// Seed for random sampling.
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            num_workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            max_samples: 0,
            sample_mode: SampleMode::Random,
            seed: 42,
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),
}
