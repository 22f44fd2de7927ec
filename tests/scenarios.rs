//! End-to-end behavior of a deduplication run over small corpora.

use neardup::{DedupConfig, Deduplicator, DocId, Document, Disposition};

fn docs(texts: &[&str]) -> Vec<Document> {
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| Document::new(i as DocId, *t))
        .collect()
}

fn dedup(threshold: f64, exact_dedup: bool) -> Deduplicator {
    Deduplicator::new(
        DedupConfig::default()
            .with_threshold(threshold)
            .with_exact_dedup(exact_dedup),
    )
    .expect("valid config")
}

/// Pairs of an original and an edited copy. No pair resembles another.
const FAMILIES: &[(&str, &str)] = &[
    (
        "the quick brown fox jumps over the lazy dog near the river bank today",
        "the quick brown fox jumps over the lazy dog near the river bank tonight",
    ),
    (
        "rust makes systems programming safer by checking ownership and borrowing at compile time",
        "rust makes systems programming safer by checking ownership and lifetimes at compile time",
    ),
    (
        "the committee approved the annual budget after a long debate about school funding",
        "the committee approved the annual budget after a short debate about road funding",
    ),
    (
        "heavy rain is expected across the northern region for most of the coming week",
        "heavy rain is expected across the northern region for most of the coming week",
    ),
    (
        "a small bakery on the corner sells fresh bread and pastries every single morning",
        "a small bakery on the corner sells fresh bread and cakes every single morning too",
    ),
    (
        "scientists measured the temperature of the deep ocean water using autonomous floats",
        "researchers measured the temperature of the deep ocean water using robotic floats",
    ),
];

fn family_corpus() -> Vec<Document> {
    let texts: Vec<&str> = FAMILIES.iter().flat_map(|(a, b)| [*a, *b]).collect();
    docs(&texts)
}

#[test]
fn cat_mat_rug_scenario() {
    let corpus = docs(&[
        "the cat sat on the mat",
        "the cat sat on the mat",
        "the cat sat on the rug",
        "completely unrelated sentence about oceans",
    ]);
    let outcome = dedup(0.5, true).run(&corpus).unwrap();

    assert_eq!(outcome.retained_ids, vec![0, 3]);
    assert_eq!(outcome.stats.exact_duplicates, 1);
    assert_eq!(outcome.stats.near_duplicates, 1);
    assert_eq!(outcome.stats.retained, 2);
    assert_eq!(outcome.stats.total_removed, 2);
    assert_eq!(outcome.dispositions[1], Disposition::ExactDuplicate { of: 0 });
    assert_eq!(outcome.dispositions[2], Disposition::NearDuplicate { of: 0 });
}

#[test]
fn free_function_matches_engine() {
    let corpus = docs(&[
        "the cat sat on the mat",
        "the cat sat on the mat",
        "the cat sat on the rug",
        "completely unrelated sentence about oceans",
    ]);
    let (retained, stats) = neardup::run(&corpus, true, 128, 0.5).unwrap();
    let outcome = dedup(0.5, true).run(&corpus).unwrap();
    assert_eq!(retained, outcome.retained_ids);
    assert_eq!(stats, outcome.stats);
}

#[test]
fn single_document_is_retained() {
    let outcome = dedup(0.85, true)
        .run(&docs(&["just one lonely document in this corpus"]))
        .unwrap();
    assert_eq!(outcome.retained_ids, vec![0]);
    assert_eq!(outcome.stats.exact_duplicates, 0);
    assert_eq!(outcome.stats.near_duplicates, 0);
}

#[test]
fn short_documents_never_match() {
    // Fewer than k tokens: no shingles, sentinel signature, always unique.
    let corpus = docs(&["hello world", "hello   world", "Hello World", "hi"]);
    let outcome = dedup(0.3, true).run(&corpus).unwrap();
    assert_eq!(outcome.retained_ids, vec![0, 1, 2, 3]);
    assert!(outcome.clusters.iter().all(|c| c.size() == 1));
}

#[test]
fn short_exact_copies_still_collapse_under_exact_dedup() {
    let outcome = dedup(0.85, true).run(&docs(&["hi", "hi"])).unwrap();
    assert_eq!(outcome.retained_ids, vec![0]);
    assert_eq!(outcome.stats.exact_duplicates, 1);
}

#[test]
fn reinserted_document_is_a_near_duplicate_of_itself() {
    let text = "the same document arrives twice in the stream";
    for threshold in [0.3, 0.5, 0.85, 0.95, 1.0] {
        let outcome = dedup(threshold, false).run(&docs(&[text, text])).unwrap();
        assert_eq!(outcome.retained_ids, vec![0], "threshold {threshold}");
        assert_eq!(outcome.dispositions[1], Disposition::NearDuplicate { of: 0 });
    }
}

#[test]
fn exact_duplicates_keep_the_earliest_copy() {
    let corpus = docs(&[
        "first unique document about mountains and valleys",
        "a repeated document about rivers and lakes",
        "another unique text concerning deserts and dunes",
        "a repeated document about rivers and lakes",
        "a repeated document about rivers and lakes",
    ]);
    for threshold in [0.3, 0.85, 1.0] {
        let outcome = dedup(threshold, true).run(&corpus).unwrap();
        assert!(outcome.retained_ids.contains(&1));
        assert!(!outcome.retained_ids.contains(&3));
        assert!(!outcome.retained_ids.contains(&4));
        assert_eq!(outcome.stats.exact_duplicates, 2);
    }
}

#[test]
fn counts_are_conserved() {
    let corpus = family_corpus();
    for threshold in [0.3, 0.5, 0.7, 0.85, 0.9, 1.0] {
        for exact_dedup in [true, false] {
            let stats = dedup(threshold, exact_dedup).run(&corpus).unwrap().stats;
            assert!(stats.is_conserved(), "{stats:?}");
            assert_eq!(stats.total, corpus.len());
            assert_eq!(stats.total_removed, stats.exact_duplicates + stats.near_duplicates);
        }
    }
}

#[test]
fn raising_threshold_never_retains_fewer() {
    let corpus = family_corpus();
    let counts: Vec<usize> = [0.3, 0.5, 0.7, 0.85, 0.9, 1.0]
        .into_iter()
        .map(|t| dedup(t, false).run(&corpus).unwrap().stats.retained)
        .collect();

    assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{counts:?}");
    assert!(counts[0] < counts[counts.len() - 1], "{counts:?}");
}

#[test]
fn representative_is_first_arrival() {
    let corpus = family_corpus();
    let outcome = dedup(0.3, false).run(&corpus).unwrap();
    for cluster in &outcome.clusters {
        assert_eq!(cluster.representative, cluster.members[0]);
        assert!(cluster.members.windows(2).all(|w| w[0] < w[1]));
    }
    let retained: Vec<DocId> = outcome
        .dispositions
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_retained())
        .map(|(i, _)| i as DocId)
        .collect();
    assert_eq!(retained, outcome.retained_ids);
}
