//! # Block Drivers
//!
//! One driver per block kind, looked up through a [`DriverRegistry`].
//!
//! ## Philosophy
//!
//! - **Closed dispatch**: Op names parse into a typed enum per kind before anything runs
//! - **Explicit registry**: Built once at startup and passed by reference, never global
//! - **Copy then swap**: A driver returns the new payload; the caller writes it back
//!
//! ## Operations
//!
//! Every driver implements [`BlockDriver`]:
//! - `create`: validate a raw map and produce the stored payload
//! - `op`: run a named edit and return the updated payload
//! - `get_as_first`: plain-text preview
//! - `change_type`: convert the block to another kind in place

pub mod driver;
pub mod ops;
pub mod registry;
pub mod scalar;
pub mod text;

pub use driver::BlockDriver;
pub use ops::{CodeOp, FileOp, HeaderOp, ImageOp, LinkOp, ListOp, QuoteOp, TextOp};
pub use registry::{DriverRegistry, RegistryError};
pub use scalar::{CodeDriver, FileDriver, ImageDriver, LinkDriver, QuoteDriver};
pub use text::{HeaderDriver, ListDriver, TextDriver};
