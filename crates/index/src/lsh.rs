//! The banded MinHash index.
//!
//! One bucket table per band maps a band key to the first document ever
//! inserted under it. Occupants are never displaced and never removed; the
//! index grows append-only over a single run.

use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use perceptual::MinHashSignature;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::{IndexError, LshConfig};
use crate::params::LshParams;

/// Arrival-order document identifier.
pub type DocId = u64;

/// Per-band bucket keys of one signature, in band order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandKeys(Vec<u64>);

impl BandKeys {
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}

/// MinHash LSH index with first-occupant-wins buckets.
#[derive(Debug)]
pub struct LshIndex {
    params: LshParams,
    tables: Vec<HashMap<u64, DocId>>,
    documents: usize,
}

impl LshIndex {
    /// Build an empty index for signatures of length `num_perm`.
    pub fn new(num_perm: usize, cfg: &LshConfig) -> Result<Self, IndexError> {
        let params = LshParams::from_config(num_perm, cfg)?;
        Ok(Self::with_params(params))
    }

    pub fn with_params(params: LshParams) -> Self {
        Self {
            params,
            tables: (0..params.bands).map(|_| HashMap::new()).collect(),
            documents: 0,
        }
    }

    pub fn params(&self) -> LshParams {
        self.params
    }

    /// Number of documents that have occupied at least one bucket.
    pub fn len(&self) -> usize {
        self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents == 0
    }

    /// Total occupied buckets across all bands.
    pub fn bucket_count(&self) -> usize {
        self.tables.iter().map(HashMap::len).sum()
    }

    /// Compute the band keys of a signature.
    ///
    /// Returns `Ok(None)` for sentinel signatures: an empty shingle set has no
    /// bands worth bucketing.
    pub fn band_keys(&self, signature: &MinHashSignature) -> Result<Option<BandKeys>, IndexError> {
        let expected = self.params.num_perm();
        if signature.len() != expected {
            return Err(IndexError::SignatureLength {
                expected,
                got: signature.len(),
            });
        }
        if signature.is_sentinel() {
            return Ok(None);
        }

        let mut buf = Vec::with_capacity(self.params.rows * 8);
        let keys = signature
            .values()
            .chunks(self.params.rows)
            .map(|band| {
                buf.clear();
                for v in band {
                    buf.extend_from_slice(&v.to_le_bytes());
                }
                xxh3_64(&buf)
            })
            .collect();
        Ok(Some(BandKeys(keys)))
    }

    /// Return the exemplar of the first band (ascending) whose bucket is
    /// occupied, or `None` when no band collides.
    pub fn query(&self, signature: &MinHashSignature) -> Result<Option<DocId>, IndexError> {
        Ok(self
            .band_keys(signature)?
            .and_then(|keys| self.query_keys(&keys)))
    }

    /// Record `id` as occupant of every vacant bucket of `signature`.
    ///
    /// Occupied buckets keep their first occupant. Returns the number of
    /// buckets `id` now occupies; sentinel signatures occupy none.
    pub fn insert(&mut self, id: DocId, signature: &MinHashSignature) -> Result<usize, IndexError> {
        match self.band_keys(signature)? {
            Some(keys) => Ok(self.insert_keys(id, &keys)),
            None => Ok(0),
        }
    }

    /// Query, and insert only when nothing matched.
    ///
    /// A document that matches an exemplar is already represented by it, so
    /// none of its bands are added to the index. This keeps every bucket
    /// occupant a cluster representative.
    pub fn query_or_insert(
        &mut self,
        id: DocId,
        signature: &MinHashSignature,
    ) -> Result<Option<DocId>, IndexError> {
        let Some(keys) = self.band_keys(signature)? else {
            return Ok(None);
        };
        if let Some(exemplar) = self.query_keys(&keys) {
            return Ok(Some(exemplar));
        }
        self.insert_keys(id, &keys);
        Ok(None)
    }

    fn query_keys(&self, keys: &BandKeys) -> Option<DocId> {
        keys.0
            .iter()
            .zip(self.tables.iter())
            .find_map(|(key, table)| table.get(key).copied())
    }

    fn insert_keys(&mut self, id: DocId, keys: &BandKeys) -> usize {
        let mut occupied = 0;
        for (key, table) in keys.0.iter().zip(self.tables.iter_mut()) {
            if let Entry::Vacant(slot) = table.entry(*key) {
                slot.insert(id);
                occupied += 1;
            }
        }
        if occupied > 0 {
            self.documents += 1;
        }
        occupied
    }
}
