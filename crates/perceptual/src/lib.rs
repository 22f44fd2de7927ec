//! # neardup perceptual layer
//!
//! Turns document text into a fixed-length MinHash signature whose slot-wise
//! agreement rate estimates the Jaccard similarity of two documents' shingle
//! sets.
//!
//! ## Contract
//!
//! - Input is text that an upstream stage already normalized. The only
//!   transforms applied here are lowercasing and whitespace tokenization.
//! - The API is a pure function of `(text, config)`: no I/O, no clocks, no
//!   global state.
//!
//! Invariant: for the same text and the same [`PerceptualConfig`], the
//! signature is bit identical.
//!
//! ## Pipeline
//!
//! 1.  **Shingling**: the text is lowercased, split on whitespace and every
//!     window of `k` tokens becomes one shingle string.
//! 2.  **MinHashing**: each shingle is hashed once with seeded xxh3, then
//!     re-mixed under `num_perm` permutation keys. Slot `i` keeps the minimum
//!     value under key `i`.
//!
//! Texts with fewer than `k` tokens have no shingles and get the sentinel
//! signature, which never collides with anything.
//!
//! ```
//! use perceptual::{MinHasher, PerceptualConfig};
//!
//! let cfg = PerceptualConfig::default();
//! let hasher = MinHasher::new(&cfg).unwrap();
//!
//! let a = hasher.signature_for_text("the quick brown fox jumps over the lazy dog", cfg.k);
//! let b = hasher.signature_for_text("The quick brown fox jumps over the lazy dog", cfg.k);
//!
//! assert_eq!(a.len(), 128);
//! assert_eq!(a.estimate_jaccard(&b), 1.0);
//! ```

pub mod config;
mod minhash;
mod shingles;
mod signature;

pub use crate::config::{
    PerceptualConfig, PerceptualError, DEFAULT_K, DEFAULT_NUM_PERM, DEFAULT_SEED,
};
pub use crate::minhash::{MinHasher, EMPTY_SLOT};
pub use crate::shingles::{extract_shingles, jaccard, ShingleSet};
pub use crate::signature::MinHashSignature;

impl MinHasher {
    /// Shingle `text` with width `k` and sign the result.
    pub fn signature_for_text(&self, text: &str, k: usize) -> MinHashSignature {
        self.signature(&extract_shingles(text, k))
    }
}
