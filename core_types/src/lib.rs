//! # Core Types
//!
//! This crate defines the identifier types shared by every blocknote crate.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: A block id and a note id are different types.
//! - **Type safety first**: Ids cannot be swapped by accident at call sites.
//!
//! ## Key Types
//!
//! - [`BlockId`]: Unique identifier for a content block
//! - [`NoteId`]: Unique identifier for the note containing blocks
//! - [`ServiceId`]: Destination of a request envelope
//! - [`TaskId`]: Source of a request envelope

pub mod ids;
pub mod uuid_tools;

pub use ids::{BlockId, NoteId, ServiceId, TaskId};
pub use uuid_tools::{new_uuid, unix_now};
