//! SHA-256 content digests.
//!
//! # Hash Algorithms
//!
//! ## Document hash
//!
//! ```text
//! SHA-256(text_bytes)
//! ```
//!
//! Plain SHA-256 of the UTF-8 text, so digests supplied by an upstream ingest
//! stage (`sha256` fields) and digests computed here agree.
//!
//! ## Raw record hash
//!
//! ```text
//! SHA-256(0x01 || raw_record_bytes)
//! ```
//!
//! The prefix byte keeps a record that failed to parse from aliasing the hash
//! of a well-formed document whose text equals the raw bytes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::HashParseError;

/// Digest width in bytes.
pub const CONTENT_HASH_LEN: usize = 32;

const RAW_RECORD_PREFIX: u8 = 0x01;

/// A 256-bit content digest.
///
/// Serializes as 64 lowercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash([u8; CONTENT_HASH_LEN]);

impl ContentHash {
    /// Wrap raw digest bytes, e.g. a hash computed by an upstream stage.
    pub const fn from_bytes(bytes: [u8; CONTENT_HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; CONTENT_HASH_LEN] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({self})")
    }
}

impl FromStr for ContentHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != CONTENT_HASH_LEN * 2 {
            return Err(HashParseError::InvalidLength {
                expected: CONTENT_HASH_LEN * 2,
                got: s.len(),
            });
        }
        let mut out = [0u8; CONTENT_HASH_LEN];
        hex::decode_to_slice(s, &mut out)
            .map_err(|err| HashParseError::InvalidHex(err.to_string()))?;
        Ok(Self(out))
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Hash document text into its identity digest.
///
/// The text is hashed byte-for-byte. Normalization is the caller's job; two
/// texts that differ only in whitespace produce different digests.
pub fn content_hash(text: &str) -> ContentHash {
    ContentHash(Sha256::digest(text.as_bytes()).into())
}

/// Hash the raw bytes of an input record that could not be read as a document.
pub fn raw_record_hash(raw: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update([RAW_RECORD_PREFIX]);
    hasher.update(raw);
    ContentHash(hasher.finalize().into())
}
