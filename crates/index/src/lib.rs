//! # neardup LSH index
//!
//! Sub-linear candidate retrieval for MinHash signatures. A signature of
//! length `n` is cut into `b` bands of `r` rows (`b * r = n`); each band is
//! hashed into a bucket key, and two documents are candidates when they share
//! any bucket.
//!
//! ## Bucket policy
//!
//! - Each `(band, key)` bucket holds exactly one exemplar: the first document
//!   inserted under it. Later documents never overwrite it.
//! - [`LshIndex::query`] scans bands in ascending order and returns the first
//!   exemplar found.
//! - [`LshIndex::query_or_insert`] inserts a document only when its query
//!   misses, so every exemplar is the representative of its cluster.
//! - Sentinel signatures (empty shingle sets) are never queried or inserted.
//!
//! The band layout is derived from the Jaccard threshold by [`LshParams`]
//! unless pinned in [`LshConfig`].
//!
//! ```
//! use index::{LshConfig, LshIndex};
//! use perceptual::{MinHasher, PerceptualConfig};
//!
//! let hasher = MinHasher::new(&PerceptualConfig::default()).unwrap();
//! let mut lsh = LshIndex::new(128, &LshConfig::new().with_threshold(0.5)).unwrap();
//!
//! let sig = hasher.signature_for_text("the cat sat on the mat", 3);
//! assert_eq!(lsh.query_or_insert(0, &sig).unwrap(), None);
//! assert_eq!(lsh.query_or_insert(1, &sig).unwrap(), Some(0));
//! ```

mod config;
mod lsh;
mod params;

pub use crate::config::{IndexError, LshConfig, DEFAULT_THRESHOLD};
pub use crate::lsh::{BandKeys, DocId, LshIndex};
pub use crate::params::LshParams;
