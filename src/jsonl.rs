//! JSON Lines corpus input and output.
//!
//! Each non-blank line is one record:
//!
//! ```text
//! {"text": "...", "text_clean": "...", "sha256": "<64 hex chars>", ...}
//! ```
//!
//! `text_clean` wins over `text` when both are present. `sha256` (alias
//! `content_hash`) is trusted when it parses; otherwise the digest is computed
//! from the text. Unknown fields are carried through to the output untouched.
//!
//! A bad record never fails the load. It is logged, reported as an
//! [`InputError`] and kept as a degraded document with empty text, so it is
//! retained unless a byte-identical bad record came before it.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use canonical::ContentHash;
use index::DocId;
use serde::Deserialize;
use tracing::{info, warn};

use crate::dedup::DedupOutcome;
use crate::document::Document;
use crate::error::InputError;

#[derive(Debug, Deserialize)]
struct InputRecord {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    text_clean: Option<String>,
    #[serde(default, alias = "content_hash")]
    sha256: Option<String>,
}

/// A corpus read from JSON Lines.
#[derive(Debug, Default)]
pub struct LoadedCorpus {
    /// Documents in file order; `documents[i].id == i`.
    pub documents: Vec<Document>,
    /// Raw bytes of each record, parallel to `documents`.
    pub records: Vec<Vec<u8>>,
    pub input_errors: Vec<InputError>,
}

impl LoadedCorpus {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Read a corpus from any buffered reader. Only I/O failures are errors.
pub fn read_corpus<R: BufRead>(mut reader: R) -> io::Result<LoadedCorpus> {
    let mut corpus = LoadedCorpus::default();
    let mut buf = Vec::new();
    let mut line = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line += 1;
        let raw = trim_line_ending(&buf);
        if raw.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let id = corpus.documents.len() as DocId;
        let (document, error) = parse_record(id, line, raw);
        if let Some(err) = error {
            warn!(line, doc_id = id, error = %err, "input_record_degraded");
            corpus.input_errors.push(err);
        }
        corpus.documents.push(document);
        corpus.records.push(raw.to_vec());
    }

    info!(
        documents = corpus.documents.len(),
        input_errors = corpus.input_errors.len(),
        "corpus_loaded"
    );
    Ok(corpus)
}

pub fn read_corpus_file<P: AsRef<Path>>(path: P) -> io::Result<LoadedCorpus> {
    let file = File::open(path)?;
    read_corpus(BufReader::new(file))
}

/// Build the document for one record, plus the error it degraded on, if any.
fn parse_record(id: DocId, line: usize, raw: &[u8]) -> (Document, Option<InputError>) {
    let record: InputRecord = match serde_json::from_slice(raw) {
        Ok(record) => record,
        Err(err) => {
            let err = InputError::MalformedRecord {
                line,
                reason: err.to_string(),
            };
            return (Document::degraded(id, raw), Some(err));
        }
    };

    let Some(text) = record.text_clean.or(record.text) else {
        return (
            Document::degraded(id, raw),
            Some(InputError::MissingText { line }),
        );
    };

    match record.sha256.as_deref().map(str::parse::<ContentHash>) {
        None => (Document::new(id, text), None),
        Some(Ok(hash)) => (Document::with_hash(id, hash, text), None),
        Some(Err(source)) => (
            Document::new(id, text),
            Some(InputError::InvalidHash { line, source }),
        ),
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Write the raw records of retained documents, one per line, in arrival
/// order. Returns the number of records written.
pub fn write_retained<W: Write>(
    writer: W,
    corpus: &LoadedCorpus,
    outcome: &DedupOutcome,
) -> io::Result<usize> {
    let mut writer = BufWriter::new(writer);
    let mut written = 0;
    for (record, disposition) in corpus.records.iter().zip(&outcome.dispositions) {
        if disposition.is_retained() {
            writer.write_all(record)?;
            writer.write_all(b"\n")?;
            written += 1;
        }
    }
    writer.flush()?;
    Ok(written)
}
