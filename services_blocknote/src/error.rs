//! Service errors and their response codes

use block_drivers::RegistryError;
use block_types::BlockError;
use core_types::BlockId;
use ipc::{ErrorCode, ResponseError, SchemaMismatchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("block not found: {0}")]
    NotFound(BlockId),

    #[error("block is in use: {0}")]
    AlreadyInUse(BlockId),

    #[error(transparent)]
    Block(#[from] BlockError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaMismatchError),

    #[error("unknown action: {0}")]
    UnknownAction(String),
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::NotFound(_) => ErrorCode::NotFound,
            ServiceError::AlreadyInUse(_) => ErrorCode::AlreadyInUse,
            ServiceError::Block(BlockError::InvalidRange { .. }) => ErrorCode::InvalidRange,
            ServiceError::Block(BlockError::UnsupportedType(_)) => ErrorCode::UnsupportedType,
            ServiceError::Block(BlockError::Decode(_)) => ErrorCode::Decode,
            ServiceError::Registry(RegistryError::UnknownType(_)) => ErrorCode::UnsupportedType,
            ServiceError::Registry(_) => ErrorCode::Internal,
            ServiceError::Payload(_) => ErrorCode::Decode,
            ServiceError::Schema(_) => ErrorCode::UnsupportedType,
            ServiceError::UnknownAction(_) => ErrorCode::UnsupportedType,
        }
    }

    /// Structured form sent back to callers
    pub fn to_response_error(&self) -> ResponseError {
        ResponseError::new(self.code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_types::BlockKind;

    #[test]
    fn test_error_codes() {
        let id = BlockId::new();
        assert_eq!(ServiceError::NotFound(id).code(), ErrorCode::NotFound);
        assert_eq!(ServiceError::AlreadyInUse(id).code(), ErrorCode::AlreadyInUse);
        assert_eq!(
            ServiceError::from(BlockError::InvalidRange { start: 2, end: 1 }).code(),
            ErrorCode::InvalidRange
        );
        assert_eq!(
            ServiceError::from(BlockError::Decode("bad".into())).code(),
            ErrorCode::Decode
        );
        assert_eq!(
            ServiceError::from(RegistryError::UnknownType("table".into())).code(),
            ErrorCode::UnsupportedType
        );
        assert_eq!(
            ServiceError::from(RegistryError::NotRegistered(BlockKind::Code)).code(),
            ErrorCode::Internal
        );
    }

    #[test]
    fn test_response_error_message() {
        let err = ServiceError::from(BlockError::UnsupportedType("rename".into()));
        let response = err.to_response_error();
        assert_eq!(response.code, ErrorCode::UnsupportedType);
        assert_eq!(response.message, "unsupported type: rename");
    }
}
