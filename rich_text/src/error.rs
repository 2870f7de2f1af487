//! Text engine errors

use thiserror::Error;

/// Errors produced by style-run operations and the run codec
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("invalid range {start}..{end}: start >= end")]
    InvalidRange { start: i64, end: i64 },

    #[error("malformed text runs: {0}")]
    Decode(String),
}
