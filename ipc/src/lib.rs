//! # Inter-Process Communication (IPC)
//!
//! Message envelopes and the typed block-service schema.
//!
//! ## Philosophy
//!
//! - **Typed, not stringly-typed**: Every request has a struct and a fixed action name
//! - **Traceable**: Responses carry the id of the request they answer
//! - **Versionable**: Payloads declare a schema version checked by the receiver
//!
//! ## Architecture
//!
//! An envelope carries routing (destination, source), the action to
//! invoke, the payload schema version, an optional correlation id and the
//! JSON payload bytes. The block service decodes the payload according to
//! the action.

pub mod message;
pub mod typed;

pub use message::{
    Compatibility, MessageEnvelope, MessageId, MessagePayload, SchemaMismatchError,
    SchemaVersion, VersionPolicy,
};
pub use typed::{
    BlockRequest, BlockResponse, ChangeTypeRequest, CreateBlockRequest, ErrorCode,
    GetAsFirstRequest, GetBlockRequest, OpBlockRequest, RegisteredTypesRequest, ResponseError,
    ResponseStatus, BLOCKNOTE_SCHEMA_VERSION, BLOCK_RESPONSE_ACTION, CHANGE_TYPE_ACTION,
    CREATE_BLOCK_ACTION, GET_AS_FIRST_ACTION, GET_BLOCK_ACTION, OP_BLOCK_ACTION,
    REGISTERED_TYPES_ACTION,
};
