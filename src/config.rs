//! Run configuration and YAML config file support.
//!
//! [`DedupConfig`] is the in-memory configuration consumed by
//! [`Deduplicator`](crate::Deduplicator). [`DedupFileConfig`] is the on-disk
//! YAML layout; every section is optional and falls back to defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "web-crawl-2024"
//!
//! shingle:
//!   k: 3
//!
//! minhash:
//!   num_perm: 128
//!   seed: 17297687000019483309
//!
//! lsh:
//!   threshold: 0.85
//!   false_positive_weight: 0.5
//!   false_negative_weight: 0.5
//!   # bands: 8
//!   # rows: 16
//!
//! dedup:
//!   exact_dedup: true
//!   parallel: false
//! ```

use std::fs;
use std::path::Path;

use index::{LshConfig, LshParams};
use perceptual::{PerceptualConfig, DEFAULT_K, DEFAULT_NUM_PERM, DEFAULT_SEED};
use serde::{Deserialize, Serialize};

use crate::cluster::CanonicalPolicy;
use crate::error::ConfigError;

/// Everything a run needs. Changing any field can change which documents
/// survive, so the effective values are recorded in every report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupConfig {
    pub perceptual: PerceptualConfig,
    pub lsh: LshConfig,
    /// Drop byte-identical documents before signature computation.
    pub exact_dedup: bool,
    /// Compute shingles and signatures on the rayon pool.
    pub use_parallel: bool,
}

impl DedupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.perceptual.k = k;
        self
    }

    pub fn with_num_perm(mut self, num_perm: usize) -> Self {
        self.perceptual.num_perm = num_perm;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.perceptual.seed = seed;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.lsh.threshold = threshold;
        self
    }

    pub fn with_exact_dedup(mut self, exact_dedup: bool) -> Self {
        self.exact_dedup = exact_dedup;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    /// Apply field overrides on top of this config. Unset fields keep their
    /// current value.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(threshold) = overrides.threshold {
            self.lsh.threshold = threshold;
        }
        if let Some(num_perm) = overrides.num_perm {
            self.perceptual.num_perm = num_perm;
        }
        if let Some(k) = overrides.k {
            self.perceptual.k = k;
        }
        if let Some(exact_dedup) = overrides.exact_dedup {
            self.exact_dedup = exact_dedup;
        }
        if let Some(use_parallel) = overrides.use_parallel {
            self.use_parallel = use_parallel;
        }
        self
    }

    /// Validate every layer and resolve the LSH band layout.
    pub fn validate(&self) -> Result<LshParams, ConfigError> {
        self.perceptual.validate()?;
        let params = LshParams::from_config(self.perceptual.num_perm, &self.lsh)?;
        Ok(params)
    }
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            perceptual: PerceptualConfig::default(),
            lsh: LshConfig::default(),
            exact_dedup: true,
            use_parallel: false,
        }
    }
}

/// Values that take precedence over a loaded configuration, such as
/// command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub threshold: Option<f64>,
    pub num_perm: Option<usize>,
    pub k: Option<usize>,
    pub exact_dedup: Option<bool>,
    pub use_parallel: Option<bool>,
}

/// The effective parameters of one run, stored next to its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    pub k: usize,
    pub num_perm: usize,
    pub seed: u64,
    pub threshold: f64,
    pub bands: usize,
    pub rows: usize,
    pub exact_dedup: bool,
    pub canonical_policy: CanonicalPolicy,
}

/// Top-level YAML layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DedupFileConfig {
    /// Configuration format version.
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub shingle: ShingleYamlConfig,

    #[serde(default)]
    pub minhash: MinHashYamlConfig,

    #[serde(default)]
    pub lsh: LshConfig,

    #[serde(default)]
    pub dedup: RunYamlConfig,
}

impl DedupFileConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML configuration.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: DedupFileConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigError::UnsupportedVersion(v.to_string())),
        }
        self.to_dedup_config().validate()?;
        Ok(())
    }

    pub fn to_dedup_config(&self) -> DedupConfig {
        DedupConfig {
            perceptual: PerceptualConfig {
                k: self.shingle.k,
                num_perm: self.minhash.num_perm,
                seed: self.minhash.seed,
            },
            lsh: self.lsh.clone(),
            exact_dedup: self.dedup.exact_dedup,
            use_parallel: self.dedup.parallel,
        }
    }
}

impl Default for DedupFileConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            shingle: ShingleYamlConfig::default(),
            minhash: MinHashYamlConfig::default(),
            lsh: LshConfig::default(),
            dedup: RunYamlConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShingleYamlConfig {
    #[serde(default = "default_k")]
    pub k: usize,
}

impl Default for ShingleYamlConfig {
    fn default() -> Self {
        Self { k: DEFAULT_K }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinHashYamlConfig {
    #[serde(default = "default_num_perm")]
    pub num_perm: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for MinHashYamlConfig {
    fn default() -> Self {
        Self {
            num_perm: DEFAULT_NUM_PERM,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunYamlConfig {
    #[serde(default = "true_value")]
    pub exact_dedup: bool,

    #[serde(default)]
    pub parallel: bool,
}

impl Default for RunYamlConfig {
    fn default() -> Self {
        Self {
            exact_dedup: true,
            parallel: false,
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
fn true_value() -> bool {
    true
}
