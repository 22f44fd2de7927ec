use canonical::{content_hash, raw_record_hash, ContentHash};
use index::DocId;
use serde::{Deserialize, Serialize};

/// One input document. `id` is its arrival position and decides which copy
/// of a duplicate group survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub content_hash: ContentHash,
    pub text: String,
}

impl Document {
    /// Build a document and hash its text.
    pub fn new(id: DocId, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id,
            content_hash: content_hash(&text),
            text,
        }
    }

    /// Build a document around a hash computed upstream.
    pub fn with_hash(id: DocId, content_hash: ContentHash, text: impl Into<String>) -> Self {
        Self {
            id,
            content_hash,
            text: text.into(),
        }
    }

    /// Stand-in for a record whose text could not be recovered.
    ///
    /// The text is empty so the document never near-matches anything. The
    /// hash covers the raw record bytes, so two byte-identical broken records
    /// still collapse under exact dedup.
    pub fn degraded(id: DocId, raw: &[u8]) -> Self {
        Self {
            id,
            content_hash: raw_record_hash(raw),
            text: String::new(),
        }
    }
}
