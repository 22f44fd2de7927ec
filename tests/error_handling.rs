use std::io::Write;

use neardup::{
    read_corpus, read_corpus_file, write_retained, ConfigError, DedupConfig, DedupFileConfig,
    Deduplicator, IndexError, InputError, LshConfig, PerceptualError,
};
use tempfile::NamedTempFile;

#[test]
fn zero_shingle_width_is_rejected() {
    let err = Deduplicator::new(DedupConfig::default().with_k(0)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Perceptual(PerceptualError::InvalidConfigK { k: 0 })
    ));
}

#[test]
fn zero_signature_length_is_rejected() {
    let err = Deduplicator::new(DedupConfig::default().with_num_perm(0)).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Perceptual(PerceptualError::InvalidConfigNumPerm { num_perm: 0 })
    ));
}

#[test]
fn thresholds_outside_unit_interval_are_rejected() {
    for threshold in [0.0, -0.5, 1.0001, f64::NAN, f64::INFINITY] {
        let err = Deduplicator::new(DedupConfig::default().with_threshold(threshold)).unwrap_err();
        assert!(
            matches!(err, ConfigError::Index(IndexError::InvalidThreshold { .. })),
            "threshold {threshold} gave {err:?}"
        );
    }
}

#[test]
fn threshold_of_one_is_accepted() {
    let dedup = Deduplicator::new(DedupConfig::default().with_threshold(1.0)).unwrap();
    assert_eq!(dedup.lsh_params().bands, 1);
    assert_eq!(dedup.lsh_params().rows, 128);
}

#[test]
fn band_override_must_cover_signature() {
    let mut config = DedupConfig::default();
    config.lsh = LshConfig::new().with_bands(10, 10);
    let err = Deduplicator::new(config).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Index(IndexError::InvalidBandShape {
            bands: 10,
            rows: 10,
            num_perm: 128
        })
    ));
}

#[test]
fn bad_config_file_is_fatal() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"version: \"1.0\"\nminhash:\n  num_perm: 0\n")
        .unwrap();
    let err = DedupFileConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("num_perm"));
}

#[test]
fn malformed_records_degrade_to_unique_documents() {
    let input = "\
{\"text\": \"the cat sat on the mat\"}
not json at all
{\"text\": \"the cat sat on the mat\"}
{\"meta\": {\"source\": \"web\"}}
not json at all
";
    let corpus = read_corpus(input.as_bytes()).unwrap();
    assert_eq!(corpus.len(), 5);
    assert_eq!(corpus.input_errors.len(), 3);
    assert_eq!(corpus.input_errors[1], InputError::MissingText { line: 4 });

    let outcome = Deduplicator::new(DedupConfig::default())
        .unwrap()
        .run(&corpus.documents)
        .unwrap();
    // The repeated bad line collapses by raw-record hash; the other bad
    // records survive untouched.
    assert_eq!(outcome.retained_ids, vec![0, 1, 3]);
    assert_eq!(outcome.stats.exact_duplicates, 2);
    assert!(outcome.stats.is_conserved());
}

#[test]
fn retained_records_are_written_verbatim() {
    let mut input = NamedTempFile::new().unwrap();
    writeln!(input, "{{\"text\": \"alpha beta gamma delta\", \"id\": \"a\"}}").unwrap();
    writeln!(input, "{{\"text\": \"alpha beta gamma delta\", \"id\": \"b\"}}").unwrap();
    writeln!(input, "{{\"text\": \"epsilon zeta eta theta\", \"id\": \"c\"}}").unwrap();
    input.flush().unwrap();

    let corpus = read_corpus_file(input.path()).unwrap();
    let outcome = Deduplicator::new(DedupConfig::default())
        .unwrap()
        .run(&corpus.documents)
        .unwrap();

    let mut out = Vec::new();
    let written = write_retained(&mut out, &corpus, &outcome).unwrap();
    assert_eq!(written, 2);
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "{\"text\": \"alpha beta gamma delta\", \"id\": \"a\"}",
            "{\"text\": \"epsilon zeta eta theta\", \"id\": \"c\"}",
        ]
    );
}

#[test]
fn missing_input_file_is_an_io_error() {
    let err = read_corpus_file("/no/such/corpus.jsonl").unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}
