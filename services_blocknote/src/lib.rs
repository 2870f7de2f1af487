//! # Block Note Service
//!
//! Owns block records and routes every block call to the driver registered
//! for the block's kind.
//!
//! ## Philosophy
//!
//! - Drivers are pure: they read a block and return new data
//! - The service is the only writer of block records
//! - A block is marked in use while an op runs on it
//! - Requests arrive as versioned envelopes; failures come back as
//!   structured responses

pub mod error;
pub mod service;
pub mod store;

pub use error::ServiceError;
pub use service::BlockNoteService;
pub use store::{BlockStore, InMemoryBlockStore};
