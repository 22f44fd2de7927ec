//! LSH configuration and the index error surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Jaccard threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Tunables for band/row selection.
///
/// By default `bands` and `rows` are derived from `threshold` and the
/// signature length. Setting both overrides the search; they must multiply to
/// the signature length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LshConfig {
    /// Jaccard similarity cutoff in `(0, 1]`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Weight of the false-positive area in the band/row search.
    #[serde(default = "default_weight")]
    pub false_positive_weight: f64,
    /// Weight of the false-negative area in the band/row search.
    #[serde(default = "default_weight")]
    pub false_negative_weight: f64,
    #[serde(default)]
    pub bands: Option<usize>,
    #[serde(default)]
    pub rows: Option<usize>,
}

impl LshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Weigh false positives against false negatives. The two must sum to 1.
    pub fn with_weights(mut self, false_positive: f64, false_negative: f64) -> Self {
        self.false_positive_weight = false_positive;
        self.false_negative_weight = false_negative;
        self
    }

    /// Pin the band layout instead of deriving it from the threshold.
    pub fn with_bands(mut self, bands: usize, rows: usize) -> Self {
        self.bands = Some(bands);
        self.rows = Some(rows);
        self
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(IndexError::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        let fp = self.false_positive_weight;
        let fn_ = self.false_negative_weight;
        let in_unit = |w: f64| (0.0..=1.0).contains(&w);
        if !in_unit(fp) || !in_unit(fn_) || ((fp + fn_) - 1.0).abs() > 1e-9 {
            return Err(IndexError::InvalidWeights {
                false_positive: fp,
                false_negative: fn_,
            });
        }
        if self.bands.is_some() != self.rows.is_some() {
            return Err(IndexError::IncompleteBandOverride);
        }
        Ok(())
    }
}

impl Default for LshConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            false_positive_weight: 0.5,
            false_negative_weight: 0.5,
            bands: None,
            rows: None,
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_weight() -> f64 {
    0.5
}

/// Errors returned by the LSH layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndexError {
    #[error("invalid config: threshold must be in (0, 1] (got {threshold})")]
    InvalidThreshold { threshold: f64 },

    #[error(
        "invalid config: weights must be in [0, 1] and sum to 1 \
         (got false_positive={false_positive}, false_negative={false_negative})"
    )]
    InvalidWeights {
        false_positive: f64,
        false_negative: f64,
    },

    #[error("invalid config: bands and rows must be set together")]
    IncompleteBandOverride,

    #[error("invalid config: num_perm must be >= 1 (got {num_perm})")]
    InvalidNumPerm { num_perm: usize },

    #[error("invalid config: bands={bands} x rows={rows} must equal num_perm={num_perm}")]
    InvalidBandShape {
        bands: usize,
        rows: usize,
        num_perm: usize,
    },

    #[error("signature length {got} does not match index num_perm {expected}")]
    SignatureLength { expected: usize, got: usize },
}
