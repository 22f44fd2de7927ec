use thiserror::Error;

/// Errors raised when decoding a [`ContentHash`](crate::ContentHash) from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashParseError {
    #[error("content hash must be {expected} hex chars (got {got})")]
    InvalidLength { expected: usize, got: usize },
    #[error("content hash is not valid hex: {0}")]
    InvalidHex(String),
}
