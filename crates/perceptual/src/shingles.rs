//! Word shingling.
//!
//! A shingle is `k` consecutive whitespace-delimited tokens joined by a single
//! space, after lowercasing. The shingle set of a document is the set of all
//! such windows; order and multiplicity are discarded.

use std::collections::HashSet;

/// The distinct shingles of one document.
pub type ShingleSet = HashSet<String>;

/// Extract the set of lowercase word `k`-shingles from `text`.
///
/// Returns an empty set when the text has fewer than `k` tokens, or when
/// `k == 0`. An empty set yields a sentinel signature downstream, so such a
/// document never matches anything.
pub fn extract_shingles(text: &str, k: usize) -> ShingleSet {
    if k == 0 {
        return ShingleSet::new();
    }
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    if tokens.len() < k {
        return ShingleSet::new();
    }

    let mut out = ShingleSet::with_capacity(tokens.len() - k + 1);
    for window in tokens.windows(k) {
        out.insert(window.join(" "));
    }
    out
}

/// Exact Jaccard similarity of two shingle sets.
///
/// Two empty sets have similarity 0.0 here: an empty document carries no
/// evidence of overlap.
pub fn jaccard(a: &ShingleSet, b: &ShingleSet) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    let union = a.len() + b.len() - inter;
    inter as f64 / union as f64
}
