//! Errors raised while decoding, converting or editing blocks

use rich_text::TextError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("invalid range {start}..{end}")]
    InvalidRange { start: i64, end: i64 },

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl From<TextError> for BlockError {
    fn from(err: TextError) -> Self {
        match err {
            TextError::InvalidRange { start, end } => BlockError::InvalidRange { start, end },
            TextError::Decode(msg) => BlockError::Decode(msg),
        }
    }
}

impl From<serde_json::Error> for BlockError {
    fn from(err: serde_json::Error) -> Self {
        BlockError::Decode(err.to_string())
    }
}
