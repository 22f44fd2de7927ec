//! Configuration and error types for shingling and MinHash.
//!
//! The perceptual layer is a pure function of `(text, config)`. Nothing here
//! reads the environment or the clock.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default shingle width in tokens.
pub const DEFAULT_K: usize = 3;

/// Default signature length.
pub const DEFAULT_NUM_PERM: usize = 128;

/// Default seed for the permutation table.
pub const DEFAULT_SEED: u64 = 0xF00D_BAAD_F00D_BAAD;

/// Parameters shared by the shingle extractor and the signature builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerceptualConfig {
    /// Number of whitespace tokens per shingle.
    #[serde(default = "default_k")]
    pub k: usize,
    /// Signature length, one slot per hash permutation.
    #[serde(default = "default_num_perm")]
    pub num_perm: usize,
    /// Seed for the base shingle hash and the permutation keys.
    ///
    /// Signatures are only comparable when built with the same seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl PerceptualConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shingle width (k).
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the number of permutations, which is also the signature length.
    pub fn with_num_perm(mut self, num_perm: usize) -> Self {
        self.num_perm = num_perm;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), PerceptualError> {
        if self.k < 1 {
            return Err(PerceptualError::InvalidConfigK { k: self.k });
        }
        if self.num_perm < 1 {
            return Err(PerceptualError::InvalidConfigNumPerm {
                num_perm: self.num_perm,
            });
        }
        Ok(())
    }
}

impl Default for PerceptualConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            num_perm: DEFAULT_NUM_PERM,
            seed: DEFAULT_SEED,
        }
    }
}

fn default_k() -> usize {
    DEFAULT_K
}

fn default_num_perm() -> usize {
    DEFAULT_NUM_PERM
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Errors returned by the perceptual layer. All of them are configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PerceptualError {
    #[error("invalid config: k must be >= 1 (got {k})")]
    InvalidConfigK { k: usize },

    #[error("invalid config: num_perm must be >= 1 (got {num_perm})")]
    InvalidConfigNumPerm { num_perm: usize },
}
