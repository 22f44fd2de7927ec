//! Duplicate clusters and canonical representative selection.
//!
//! The resolver consumes `(id, matched_exemplar)` pairs in arrival order. An
//! unmatched document opens a new cluster and becomes its representative; a
//! matched one joins the cluster of its exemplar. Representatives are fixed at
//! creation and survive; every other member is dropped from the output.

use std::collections::HashMap;

use index::DocId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How a cluster's surviving document is chosen.
///
/// Only first-arrival is implemented: the earliest document routed into a
/// cluster represents it regardless of length or quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalPolicy {
    #[default]
    FirstArrival,
}

/// A set of near-duplicate documents and the one that stands in for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub representative: DocId,
    /// All members in arrival order, the representative first.
    pub members: Vec<DocId>,
}

impl Cluster {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Outcome of resolving one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The document opened a new cluster and is retained.
    Representative,
    /// The document joined the cluster represented by the given id.
    MemberOf(DocId),
}

/// Incrementally built cluster set for one run.
#[derive(Debug, Default)]
pub struct ClusterResolver {
    policy: CanonicalPolicy,
    clusters: Vec<Cluster>,
    by_representative: HashMap<DocId, usize>,
}

impl ClusterResolver {
    pub fn new(policy: CanonicalPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> CanonicalPolicy {
        self.policy
    }

    /// Route `id` into a cluster. Must be called in arrival order.
    pub fn resolve(&mut self, id: DocId, matched: Option<DocId>) -> Resolution {
        let Some(exemplar) = matched else {
            self.open(id);
            return Resolution::Representative;
        };

        match self.by_representative.get(&exemplar) {
            Some(&slot) => {
                let cluster = &mut self.clusters[slot];
                cluster.members.push(id);
                Resolution::MemberOf(cluster.representative)
            }
            None => {
                // Index exemplars are always representatives; reaching this
                // means the caller fed an id the resolver never saw.
                warn!(doc_id = id, exemplar, "unknown_exemplar");
                self.open(id);
                Resolution::Representative
            }
        }
    }

    fn open(&mut self, id: DocId) {
        self.by_representative.insert(id, self.clusters.len());
        self.clusters.push(Cluster {
            representative: id,
            members: vec![id],
        });
    }

    /// Representatives in the order their clusters were created.
    pub fn retained_ids(&self) -> Vec<DocId> {
        self.clusters.iter().map(|c| c.representative).collect()
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn into_clusters(self) -> Vec<Cluster> {
        self.clusters
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Number of documents routed so far.
    pub fn processed(&self) -> usize {
        self.clusters.iter().map(Cluster::size).sum()
    }
}
