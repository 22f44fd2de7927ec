//! Content identity for the neardup engine.
//!
//! Every document that reaches the deduplicator carries a 256-bit digest of its
//! normalized text. Two documents with the same digest are exact duplicates and
//! never reach the MinHash stage.
//!
//! ## What lives here
//!
//! - [`ContentHash`], a fixed 32-byte SHA-256 digest with a hex text form
//! - [`content_hash`] for hashing document text
//! - [`raw_record_hash`] for records that could not be parsed into a document
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. The same bytes hash to the
//! same digest on every machine.
//!
//! ```
//! use canonical::{content_hash, ContentHash};
//!
//! let a = content_hash("the cat sat on the mat");
//! let b: ContentHash = a.to_string().parse().unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.to_string().len(), 64);
//! ```

mod error;
mod hash;

pub use crate::error::HashParseError;
pub use crate::hash::{content_hash, raw_record_hash, ContentHash, CONTENT_HASH_LEN};
