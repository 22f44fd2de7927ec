//! MinHash signature construction.
//!
//! Each shingle is hashed once with seeded xxh3. Permutation `j` is simulated
//! by re-mixing that base hash under a key derived from `(seed, j)`. The key
//! table is built once per [`MinHasher`] and reused for every document, so all
//! signatures from one hasher are comparable.

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::config::{PerceptualConfig, PerceptualError};
use crate::shingles::ShingleSet;
use crate::signature::MinHashSignature;

/// Slot value of a signature built from an empty shingle set.
///
/// Real slot values are masked to 63 bits, so they never reach this value.
pub const EMPTY_SLOT: u64 = u64::MAX;

const SLOT_MASK: u64 = u64::MAX >> 1;

/// Builds MinHash signatures with a fixed permutation table.
///
/// `MinHasher` is immutable after construction and can be shared across
/// worker threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinHasher {
    seed: u64,
    keys: Vec<u64>,
}

impl MinHasher {
    /// Build the permutation table for `cfg.num_perm` slots.
    pub fn new(cfg: &PerceptualConfig) -> Result<Self, PerceptualError> {
        cfg.validate()?;
        let keys = (0..cfg.num_perm)
            .map(|j| permutation_key(cfg.seed, j))
            .collect();
        Ok(Self {
            seed: cfg.seed,
            keys,
        })
    }

    pub fn num_perm(&self) -> usize {
        self.keys.len()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Compute the signature of a shingle set.
    ///
    /// Iteration order of the set does not matter; the result is a pure
    /// function of the set contents and the permutation table.
    pub fn signature(&self, shingles: &ShingleSet) -> MinHashSignature {
        if shingles.is_empty() {
            return MinHashSignature::empty(self.keys.len());
        }

        let base: Vec<u64> = shingles
            .iter()
            .map(|s| xxh3_64_with_seed(s.as_bytes(), self.seed))
            .collect();

        let mut values = Vec::with_capacity(self.keys.len());
        values.extend(self.keys.iter().map(|&key| compute_slot(&base, key)));
        MinHashSignature::from_values(values)
    }
}

/// Minimum of the base hashes under one permutation key.
#[inline]
pub(crate) fn compute_slot(base_hashes: &[u64], key: u64) -> u64 {
    let mut minv = EMPTY_SLOT;
    for &val in base_hashes {
        let h = mix_u64(val, key) & SLOT_MASK;
        if h < minv {
            minv = h;
        }
    }
    minv
}

/// Key for permutation `j`.
#[inline]
pub(crate) fn permutation_key(seed: u64, j: usize) -> u64 {
    let step = (j as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    splitmix64(seed.wrapping_add(step))
}

/// Re-hash a base value under a permutation key.
#[inline]
pub(crate) fn mix_u64(x: u64, key: u64) -> u64 {
    let mut h = xxh3_64_with_seed(&x.to_le_bytes(), key);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ceb9fe1a85ec53);
    h ^ (h >> 33)
}

#[inline]
pub(crate) fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
