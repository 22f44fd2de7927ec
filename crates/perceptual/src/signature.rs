//! The MinHash signature value type.

use serde::{Deserialize, Serialize};

use crate::minhash::EMPTY_SLOT;

/// A fixed-length MinHash signature.
///
/// `values[i]` is the minimum, under permutation `i`, of the hashed shingles
/// of one document. A document with no shingles has every slot set to
/// [`EMPTY_SLOT`], which no real shingle hash can take.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinHashSignature {
    values: Vec<u64>,
}

impl MinHashSignature {
    pub(crate) fn from_values(values: Vec<u64>) -> Self {
        Self { values }
    }

    /// The sentinel signature of an empty shingle set.
    pub fn empty(num_perm: usize) -> Self {
        Self {
            values: vec![EMPTY_SLOT; num_perm],
        }
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Signature length (the number of permutations it was built with).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` for a zero-length signature. A sentinel is not empty: it has
    /// `num_perm` slots, all set to [`EMPTY_SLOT`].
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `true` when the signature was built from an empty shingle set.
    ///
    /// Sentinel signatures carry no similarity evidence and must never be
    /// bucketed.
    pub fn is_sentinel(&self) -> bool {
        self.values.iter().all(|&v| v == EMPTY_SLOT)
    }

    /// Estimate Jaccard similarity as the fraction of agreeing slots.
    ///
    /// Returns 0.0 when either side is a sentinel or the lengths differ.
    pub fn estimate_jaccard(&self, other: &MinHashSignature) -> f64 {
        if self.values.len() != other.values.len() || self.values.is_empty() {
            return 0.0;
        }
        if self.is_sentinel() || other.is_sentinel() {
            return 0.0;
        }
        let agree = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();
        agree as f64 / self.values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_signature_is_sentinel() {
        let sig = MinHashSignature::empty(16);
        assert_eq!(sig.len(), 16);
        assert!(sig.is_sentinel());
        assert!(!sig.is_empty());
    }

    #[test]
    fn zero_length_signature_is_empty() {
        let sig = MinHashSignature::from_values(Vec::new());
        assert!(sig.is_empty());
        assert_eq!(sig.len(), 0);
    }

    #[test]
    fn estimate_counts_agreeing_slots() {
        let a = MinHashSignature::from_values(vec![1, 2, 3, 4]);
        let b = MinHashSignature::from_values(vec![1, 2, 9, 9]);
        assert_eq!(a.estimate_jaccard(&b), 0.5);
        assert_eq!(a.estimate_jaccard(&a), 1.0);
    }

    #[test]
    fn estimate_with_sentinel_is_zero() {
        let a = MinHashSignature::empty(4);
        let b = MinHashSignature::from_values(vec![1, 2, 3, 4]);
        assert_eq!(a.estimate_jaccard(&a), 0.0);
        assert_eq!(a.estimate_jaccard(&b), 0.0);
    }

    #[test]
    fn estimate_length_mismatch_is_zero() {
        let a = MinHashSignature::from_values(vec![1, 2, 3]);
        let b = MinHashSignature::from_values(vec![1, 2, 3, 4]);
        assert_eq!(a.estimate_jaccard(&b), 0.0);
    }

    #[test]
    fn partial_sentinel_is_not_sentinel() {
        let sig = MinHashSignature::from_values(vec![EMPTY_SLOT, 7]);
        assert!(!sig.is_sentinel());
    }
}
