use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use neardup::{
    DedupConfig, Deduplicator, DocId, Document, LshIndex, LshParams, MinHasher, PerceptualConfig,
};

const WORDS: &[&str] = &[
    "river", "stone", "market", "engine", "garden", "signal", "winter", "harbor", "letter",
    "forest", "copper", "window", "planet", "silver", "ladder", "bridge", "candle", "meadow",
    "rocket", "valley", "anchor", "basket", "canyon", "dragon",
];

/// Deterministic corpus where roughly a third of documents are light edits
/// of an earlier one and a tenth are exact copies.
fn synthetic_corpus(n: usize) -> Vec<Document> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut texts: Vec<String> = Vec::with_capacity(n);
    for i in 0..n {
        let roll = next() % 10;
        let text = if i > 0 && roll == 0 {
            texts[(next() as usize) % i].clone()
        } else if i > 0 && roll < 4 {
            let mut words: Vec<&str> = texts[(next() as usize) % i].split(' ').collect();
            let slot = (next() as usize) % words.len();
            words[slot] = WORDS[(next() as usize) % WORDS.len()];
            words.join(" ")
        } else {
            (0..40)
                .map(|_| WORDS[(next() as usize) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" ")
        };
        texts.push(text);
    }
    texts
        .into_iter()
        .enumerate()
        .map(|(i, t)| Document::new(i as DocId, t))
        .collect()
}

fn bench_signatures(c: &mut Criterion) {
    let mut group = c.benchmark_group("minhash_signature");
    let corpus = synthetic_corpus(1);
    let doc = &corpus[0];
    for num_perm in [64usize, 128, 256] {
        let hasher = MinHasher::new(&PerceptualConfig::default().with_num_perm(num_perm))
            .expect("valid config");
        group.bench_with_input(BenchmarkId::from_parameter(num_perm), &num_perm, |b, _| {
            b.iter(|| hasher.signature_for_text(black_box(&doc.text), 3))
        });
    }
    group.finish();
}

fn bench_lsh_insert(c: &mut Criterion) {
    let docs = synthetic_corpus(2_000);
    let hasher = MinHasher::new(&PerceptualConfig::default()).expect("valid config");
    let signatures: Vec<_> = docs
        .iter()
        .map(|d| hasher.signature_for_text(&d.text, 3))
        .collect();
    let params = LshParams::new(16, 8, 128).expect("valid layout");

    let mut group = c.benchmark_group("lsh_query_or_insert");
    group.throughput(Throughput::Elements(signatures.len() as u64));
    group.bench_function("2000_docs", |b| {
        b.iter(|| {
            let mut index = LshIndex::with_params(params);
            for (id, sig) in signatures.iter().enumerate() {
                black_box(index.query_or_insert(id as DocId, sig).expect("matching length"));
            }
            index.len()
        })
    });
    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup_run");
    group.sample_size(20);
    for n in [1_000usize, 10_000] {
        let docs = synthetic_corpus(n);
        group.throughput(Throughput::Elements(n as u64));
        for parallel in [false, true] {
            let dedup = Deduplicator::new(DedupConfig::default().with_parallel(parallel))
                .expect("valid config");
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, n), &docs, |b, docs| {
                b.iter(|| dedup.run(black_box(docs)).expect("run succeeds"))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_signatures, bench_lsh_insert, bench_full_run);
criterion_main!(benches);
