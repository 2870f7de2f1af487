//! Unique identifiers for blocknote entities
//!
//! Every identifier wraps a UUID so ids of different kinds cannot be
//! confused with each other at compile time.

use crate::uuid_tools::new_uuid;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(new_uuid())
            }

            /// Creates an identifier from a UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Unique identifier for a content block
    ///
    /// A block keeps its id across type changes; only its payload and type
    /// tag are replaced.
    BlockId,
    "Block"
);

define_id!(
    /// Unique identifier for the note that contains a block
    NoteId,
    "Note"
);

define_id!(
    /// Unique identifier for a service endpoint
    ServiceId,
    "Service"
);

define_id!(
    /// Unique identifier for the task that sent a request
    TaskId,
    "Task"
);
