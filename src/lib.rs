//! Workspace umbrella crate for neardup, a corpus near-duplicate remover.
//!
//! This crate stitches the content-hash, MinHash and LSH layers into a single
//! run over an ordered corpus:
//!
//! ```text
//! Document ─▶ exact hash filter ─▶ shingles ─▶ MinHash ─▶ LSH query/insert ─▶ clusters
//! ```
//!
//! The first document of every duplicate group survives. Everything else is
//! counted as an exact or near duplicate and dropped.
//!
//! ```
//! use neardup::{DedupConfig, Deduplicator, Document};
//!
//! let docs = vec![
//!     Document::new(0, "the cat sat on the mat"),
//!     Document::new(1, "the cat sat on the mat"),
//!     Document::new(2, "completely unrelated sentence about oceans"),
//! ];
//!
//! let dedup = Deduplicator::new(DedupConfig::default()).unwrap();
//! let outcome = dedup.run(&docs).unwrap();
//!
//! assert_eq!(outcome.retained_ids, vec![0, 2]);
//! assert_eq!(outcome.stats.exact_duplicates, 1);
//! ```

mod cluster;
mod config;
mod dedup;
mod document;
mod error;
mod jsonl;
mod report;

pub use canonical::{content_hash, raw_record_hash, ContentHash, HashParseError};
pub use index::{DocId, IndexError, LshConfig, LshIndex, LshParams};
pub use perceptual::{
    extract_shingles, jaccard, MinHashSignature, MinHasher, PerceptualConfig, PerceptualError,
    ShingleSet,
};

pub use crate::cluster::{CanonicalPolicy, Cluster, ClusterResolver, Resolution};
pub use crate::config::{
    ConfigOverrides, DedupConfig, DedupFileConfig, MinHashYamlConfig, RunParams, RunYamlConfig,
    ShingleYamlConfig,
};
pub use crate::dedup::{run, DedupOutcome, DedupStats, Deduplicator, Disposition};
pub use crate::document::Document;
pub use crate::error::{ConfigError, DedupError, InputError};
pub use crate::jsonl::{read_corpus, read_corpus_file, write_retained, LoadedCorpus};
pub use crate::report::{ClusterSummary, DedupReport, InputErrorSummary, REPORT_CLUSTER_LIMIT};
