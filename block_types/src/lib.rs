//! # Block Types
//!
//! The block record and the closed set of content variants it can carry.
//!
//! ## Philosophy
//!
//! - **One payload per block**: The payload variant always matches the block's kind
//! - **Maps at the edge**: Payloads travel as string-keyed maps and are typed on arrival
//! - **Conversion keeps content**: Changing a block's type carries its text across
//!
//! ## Key Types
//!
//! - [`Block`]: id, note, kind, timestamps, in-use flag and wire payload
//! - [`BlockKind`]: the eight type tags
//! - [`BlockPayload`]: typed payload with map codecs
//! - [`ConversionTarget`]: the `new_type` values and [`convert`] between them

pub mod block;
pub mod convert;
pub mod error;
pub mod kind;
pub mod lang;
pub mod payload;

pub use block::Block;
pub use convert::{convert, convert_to, ConversionSource};
pub use error::BlockError;
pub use kind::{BlockKind, ConversionTarget, ListKind};
pub use lang::{detect_language, UNKNOWN_LANGUAGE};
pub use payload::{
    BlockPayload, CodeData, FileData, HeaderData, ImageData, LinkData, ListData, QuoteData,
};
