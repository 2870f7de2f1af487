//! Typed requests and responses for the block-content service
//!
//! Each request type names its envelope action and is carried under
//! [`BLOCKNOTE_SCHEMA_VERSION`]. Every request is answered by a
//! [`BlockResponse`] correlated to the request's message id.

use crate::{MessageEnvelope, MessageId, MessagePayload, SchemaVersion};
use core_types::{BlockId, NoteId, ServiceId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block service schema version (v1.0)
pub const BLOCKNOTE_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

pub const CREATE_BLOCK_ACTION: &str = "blocknote.block.create";
pub const OP_BLOCK_ACTION: &str = "blocknote.block.op";
pub const GET_AS_FIRST_ACTION: &str = "blocknote.block.first";
pub const CHANGE_TYPE_ACTION: &str = "blocknote.block.change_type";
pub const GET_BLOCK_ACTION: &str = "blocknote.block.get";
pub const REGISTERED_TYPES_ACTION: &str = "blocknote.block.types";
pub const BLOCK_RESPONSE_ACTION: &str = "blocknote.block.response";

/// A request the block service understands
pub trait BlockRequest: Serialize {
    /// Envelope action this request travels under
    const ACTION: &'static str;

    /// Wraps the request in an envelope addressed to `destination`
    fn into_envelope(&self, destination: ServiceId) -> Result<MessageEnvelope, serde_json::Error>
    where
        Self: Sized,
    {
        Ok(MessageEnvelope::new(
            destination,
            Self::ACTION,
            BLOCKNOTE_SCHEMA_VERSION,
            MessagePayload::new(self)?,
        ))
    }
}

/// Create a block of `block_type` inside `note_id`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateBlockRequest {
    pub block_type: String,
    pub note_id: NoteId,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Run `op_name` against a block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpBlockRequest {
    pub block_id: BlockId,
    pub op_name: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Plain-text preview of a block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetAsFirstRequest {
    pub block_id: BlockId,
}

/// Convert a block to `new_type`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeTypeRequest {
    pub block_id: BlockId,
    pub new_type: String,
}

/// Fetch the full block record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetBlockRequest {
    pub block_id: BlockId,
}

/// List the type tags the service has drivers for
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisteredTypesRequest {}

impl BlockRequest for CreateBlockRequest {
    const ACTION: &'static str = CREATE_BLOCK_ACTION;
}

impl BlockRequest for OpBlockRequest {
    const ACTION: &'static str = OP_BLOCK_ACTION;
}

impl BlockRequest for GetAsFirstRequest {
    const ACTION: &'static str = GET_AS_FIRST_ACTION;
}

impl BlockRequest for ChangeTypeRequest {
    const ACTION: &'static str = CHANGE_TYPE_ACTION;
}

impl BlockRequest for GetBlockRequest {
    const ACTION: &'static str = GET_BLOCK_ACTION;
}

impl BlockRequest for RegisteredTypesRequest {
    const ACTION: &'static str = REGISTERED_TYPES_ACTION;
}

/// Response status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    Error(ResponseError),
}

/// Structured response to any block request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlockResponse {
    pub version: SchemaVersion,
    pub status: ResponseStatus,
    /// Result value; `None` for requests with nothing to return
    pub output: Option<Value>,
}

impl BlockResponse {
    pub fn ok(output: Value) -> Self {
        Self {
            version: BLOCKNOTE_SCHEMA_VERSION,
            status: ResponseStatus::Ok,
            output: Some(output),
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            version: BLOCKNOTE_SCHEMA_VERSION,
            status: ResponseStatus::Ok,
            output: None,
        }
    }

    pub fn error(error: ResponseError) -> Self {
        Self {
            version: BLOCKNOTE_SCHEMA_VERSION,
            status: ResponseStatus::Error(error),
            output: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, ResponseStatus::Ok)
    }

    /// Wraps the response in an envelope correlated to `request`
    pub fn into_envelope(
        self,
        destination: ServiceId,
        request: MessageId,
    ) -> Result<MessageEnvelope, serde_json::Error> {
        let payload = MessagePayload::new(&self)?;
        Ok(MessageEnvelope::new(
            destination,
            BLOCK_RESPONSE_ACTION,
            self.version,
            payload,
        )
        .with_correlation(request))
    }
}

/// Failure classes reported to callers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidRange,
    UnsupportedType,
    Decode,
    NotFound,
    AlreadyInUse,
    Internal,
}

/// Structured failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl ResponseError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
