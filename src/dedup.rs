//! The deduplication run.
//!
//! A run is two phases over an ordered corpus:
//!
//! 1.  **Map**: every document that survives exact dedup is shingled and
//!     signed. This is a pure per-document function and optionally runs on
//!     the rayon pool.
//! 2.  **Reduce**: signatures are fed to the LSH index and the cluster
//!     resolver strictly in arrival order on the calling thread.
//!
//! All mutable state lives in a per-call run state, so one
//! [`Deduplicator`] can serve independent corpora concurrently.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Instant;

use canonical::ContentHash;
use index::{DocId, LshIndex, LshParams};
use perceptual::{MinHashSignature, MinHasher};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Level};

use crate::cluster::{CanonicalPolicy, Cluster, ClusterResolver, Resolution};
use crate::config::{DedupConfig, RunParams};
use crate::document::Document;
use crate::error::{ConfigError, DedupError};

/// What happened to one input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Disposition {
    Retained,
    /// Same content hash as the earlier document `of`.
    ExactDuplicate { of: DocId },
    /// Joined the cluster represented by `of`.
    NearDuplicate { of: DocId },
}

impl Disposition {
    pub fn is_retained(&self) -> bool {
        matches!(self, Disposition::Retained)
    }
}

/// Summary counts of a run.
///
/// `total == exact_duplicates + near_duplicates + retained` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupStats {
    pub total: usize,
    pub exact_duplicates: usize,
    pub near_duplicates: usize,
    pub retained: usize,
    pub total_removed: usize,
    /// `total_removed / total`, or 0.0 for an empty corpus.
    pub removal_rate: f64,
}

impl DedupStats {
    fn from_counts(
        total: usize,
        exact_duplicates: usize,
        survivors: usize,
        retained: usize,
    ) -> Self {
        let near_duplicates = survivors - retained;
        let total_removed = exact_duplicates + near_duplicates;
        let removal_rate = if total == 0 {
            0.0
        } else {
            total_removed as f64 / total as f64
        };
        Self {
            total,
            exact_duplicates,
            near_duplicates,
            retained,
            total_removed,
            removal_rate,
        }
    }

    pub fn is_conserved(&self) -> bool {
        self.total == self.exact_duplicates + self.near_duplicates + self.retained
    }
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupOutcome {
    /// Surviving ids in arrival order.
    pub retained_ids: Vec<DocId>,
    pub stats: DedupStats,
    /// One entry per input document, in input order.
    pub dispositions: Vec<Disposition>,
    /// Near-duplicate clusters in creation order, singletons included.
    pub clusters: Vec<Cluster>,
}

impl DedupOutcome {
    /// Clusters with at least one dropped member, largest first. Ties keep
    /// creation order.
    pub fn duplicate_clusters(&self) -> Vec<&Cluster> {
        let mut dups: Vec<&Cluster> = self.clusters.iter().filter(|c| c.size() > 1).collect();
        dups.sort_by(|a, b| b.size().cmp(&a.size()));
        dups
    }
}

/// Mutable state of one run. Dropped when the run ends.
struct RunState {
    seen: HashMap<ContentHash, DocId>,
    index: LshIndex,
    clusters: ClusterResolver,
}

impl RunState {
    fn new(params: LshParams, policy: CanonicalPolicy) -> Self {
        Self {
            seen: HashMap::new(),
            index: LshIndex::with_params(params),
            clusters: ClusterResolver::new(policy),
        }
    }

    /// Record `doc`'s hash. Returns the earlier holder of the same hash.
    fn first_seen(&mut self, doc: &Document) -> Option<DocId> {
        match self.seen.entry(doc.content_hash) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(doc.id);
                None
            }
        }
    }
}

/// Configured deduplication engine.
///
/// Holds only immutable configuration and the permutation table; all
/// per-corpus state is created inside [`Deduplicator::run`].
#[derive(Debug, Clone)]
pub struct Deduplicator {
    config: DedupConfig,
    hasher: MinHasher,
    params: LshParams,
}

impl Deduplicator {
    /// Validate `config` and build the engine. Nothing is clamped.
    pub fn new(config: DedupConfig) -> Result<Self, ConfigError> {
        let params = config.validate()?;
        let hasher = MinHasher::new(&config.perceptual)?;
        Ok(Self {
            config,
            hasher,
            params,
        })
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    pub fn lsh_params(&self) -> LshParams {
        self.params
    }

    /// The effective parameters, for recording next to the output.
    pub fn params(&self) -> RunParams {
        RunParams {
            k: self.config.perceptual.k,
            num_perm: self.config.perceptual.num_perm,
            seed: self.config.perceptual.seed,
            threshold: self.config.lsh.threshold,
            bands: self.params.bands,
            rows: self.params.rows,
            exact_dedup: self.config.exact_dedup,
            canonical_policy: CanonicalPolicy::FirstArrival,
        }
    }

    pub fn signature(&self, doc: &Document) -> MinHashSignature {
        self.hasher.signature_for_text(&doc.text, self.config.perceptual.k)
    }

    /// Deduplicate `documents`, which must be in arrival order.
    ///
    /// Ids must be unique; a repeated id fails the run before any document
    /// is processed.
    pub fn run(&self, documents: &[Document]) -> Result<DedupOutcome, DedupError> {
        check_unique_ids(documents)?;
        let start = Instant::now();
        let span = tracing::span!(
            Level::INFO,
            "neardup.run",
            documents = documents.len(),
            bands = self.params.bands,
            rows = self.params.rows
        );
        let _guard = span.enter();

        info!(
            total = documents.len(),
            k = self.config.perceptual.k,
            num_perm = self.config.perceptual.num_perm,
            threshold = self.config.lsh.threshold,
            exact_dedup = self.config.exact_dedup,
            parallel = self.config.use_parallel,
            "dedup_started"
        );

        let mut state = RunState::new(self.params, CanonicalPolicy::FirstArrival);
        let mut dispositions = vec![Disposition::Retained; documents.len()];

        let mut survivors = Vec::with_capacity(documents.len());
        let mut exact_duplicates = 0usize;
        for (pos, doc) in documents.iter().enumerate() {
            if self.config.exact_dedup {
                if let Some(of) = state.first_seen(doc) {
                    debug!(doc_id = doc.id, of, "exact_duplicate");
                    dispositions[pos] = Disposition::ExactDuplicate { of };
                    exact_duplicates += 1;
                    continue;
                }
            }
            survivors.push(pos);
        }

        let signatures: Vec<MinHashSignature> = if self.config.use_parallel {
            survivors
                .par_iter()
                .map(|&pos| self.signature(&documents[pos]))
                .collect()
        } else {
            survivors
                .iter()
                .map(|&pos| self.signature(&documents[pos]))
                .collect()
        };

        for (&pos, signature) in survivors.iter().zip(&signatures) {
            let doc = &documents[pos];
            let matched = state.index.query_or_insert(doc.id, signature)?;
            if let Resolution::MemberOf(of) = state.clusters.resolve(doc.id, matched) {
                debug!(doc_id = doc.id, of, "near_duplicate");
                dispositions[pos] = Disposition::NearDuplicate { of };
            }
        }

        let retained_ids = state.clusters.retained_ids();
        let stats = DedupStats::from_counts(
            documents.len(),
            exact_duplicates,
            survivors.len(),
            retained_ids.len(),
        );
        let elapsed_micros = start.elapsed().as_micros();
        info!(
            total = stats.total,
            exact_duplicates = stats.exact_duplicates,
            near_duplicates = stats.near_duplicates,
            retained = stats.retained,
            clusters = state.clusters.len(),
            indexed = state.index.len(),
            buckets = state.index.bucket_count(),
            elapsed_micros,
            "dedup_finished"
        );

        Ok(DedupOutcome {
            retained_ids,
            stats,
            dispositions,
            clusters: state.clusters.into_clusters(),
        })
    }
}

fn check_unique_ids(documents: &[Document]) -> Result<(), DedupError> {
    let mut positions: HashMap<DocId, usize> = HashMap::with_capacity(documents.len());
    for (second, doc) in documents.iter().enumerate() {
        if let Some(&first) = positions.get(&doc.id) {
            return Err(DedupError::DuplicateDocumentId {
                id: doc.id,
                first,
                second,
            });
        }
        positions.insert(doc.id, second);
    }
    Ok(())
}

/// One-shot run with default `k` and seed.
///
/// Returns the retained ids in arrival order and the run statistics.
pub fn run(
    documents: &[Document],
    exact_dedup: bool,
    num_perm: usize,
    threshold: f64,
) -> Result<(Vec<DocId>, DedupStats), DedupError> {
    let config = DedupConfig::default()
        .with_exact_dedup(exact_dedup)
        .with_num_perm(num_perm)
        .with_threshold(threshold);
    let outcome = Deduplicator::new(config)?.run(documents)?;
    Ok((outcome.retained_ids, outcome.stats))
}
