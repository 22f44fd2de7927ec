use std::fs;
use std::path::Path;

use index::DocId;
use serde::{Deserialize, Serialize};

use crate::config::RunParams;
use crate::dedup::{DedupOutcome, DedupStats};
use crate::error::{DedupError, InputError};

/// Clusters listed in a report, largest first.
pub const REPORT_CLUSTER_LIMIT: usize = 20;

/// Machine-readable summary of a run, written next to its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupReport {
    pub params: RunParams,
    pub stats: DedupStats,
    /// Near-duplicate clusters with more than one member.
    pub duplicate_clusters: usize,
    pub largest_clusters: Vec<ClusterSummary>,
    pub input_errors: Vec<InputErrorSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub representative: DocId,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputErrorSummary {
    pub line: usize,
    pub error: String,
}

impl DedupReport {
    pub fn from_outcome(
        params: RunParams,
        outcome: &DedupOutcome,
        input_errors: &[InputError],
    ) -> Self {
        let duplicates = outcome.duplicate_clusters();
        Self {
            params,
            stats: outcome.stats.clone(),
            duplicate_clusters: duplicates.len(),
            largest_clusters: duplicates
                .iter()
                .take(REPORT_CLUSTER_LIMIT)
                .map(|c| ClusterSummary {
                    representative: c.representative,
                    size: c.size(),
                })
                .collect(),
            input_errors: input_errors
                .iter()
                .map(|err| InputErrorSummary {
                    line: err.line(),
                    error: err.to_string(),
                })
                .collect(),
        }
    }

    /// Write the report as pretty JSON, creating parent directories.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), DedupError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
