//! Error types for the deduplication run.
//!
//! | Error | Fatal | Raised by |
//! |-------|-------|-----------|
//! | [`ConfigError`] | yes, before any document is touched | config loading, `Deduplicator::new` |
//! | [`InputError`] | never | the JSONL reader; the record degrades to a unique document |
//! | [`DedupError`] | yes | the run and the CLI (config, repeated ids, I/O, serialization) |
//!
//! No error is retryable: the core has no network and does no I/O of its own.

use canonical::HashParseError;
use index::{DocId, IndexError};
use perceptual::PerceptualError;
use thiserror::Error;

/// Invalid configuration. Values are rejected, never clamped.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Perceptual(#[from] PerceptualError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// A malformed input record. Logged and degraded, never propagated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("line {line}: record has no text")]
    MissingText { line: usize },

    #[error("line {line}: invalid content hash: {source}")]
    InvalidHash {
        line: usize,
        #[source]
        source: HashParseError,
    },
}

impl InputError {
    /// 1-based input line the error refers to.
    pub fn line(&self) -> usize {
        match self {
            InputError::MalformedRecord { line, .. }
            | InputError::MissingText { line }
            | InputError::InvalidHash { line, .. } => *line,
        }
    }
}

/// Top-level failure of a run.
#[derive(Debug, Error)]
pub enum DedupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("index failure: {0}")]
    Index(#[from] IndexError),

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failure: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document id {id} appears more than once (positions {first} and {second})")]
    DuplicateDocumentId {
        id: DocId,
        first: usize,
        second: usize,
    },
}
