//! The block record

use crate::{BlockError, BlockKind, BlockPayload};
use core_types::{unix_now, BlockId, NoteId};
use rich_text::DataMap;
use serde::{Deserialize, Serialize};

/// A unit of note content
///
/// `data` is the wire form of the payload and is only interpreted by the
/// driver registered for `kind`. `None` means the payload is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    pub note_id: NoteId,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub data: Option<DataMap>,
}

impl Block {
    /// Fresh block stamped with the current time
    pub fn new(kind: BlockKind, note_id: NoteId, data: Option<DataMap>) -> Self {
        let now = unix_now();
        Self {
            id: BlockId::new(),
            kind,
            note_id,
            created_at: now,
            updated_at: now,
            is_used: false,
            data,
        }
    }

    /// Decodes `data` for this block's kind
    pub fn payload(&self) -> Result<Option<BlockPayload>, BlockError> {
        self.data
            .as_ref()
            .map(|map| BlockPayload::from_map(self.kind, map))
            .transpose()
    }

    /// Replaces kind and data with `payload`
    pub fn set_payload(&mut self, payload: &BlockPayload) {
        self.kind = payload.kind();
        self.data = Some(payload.to_map());
    }

    pub fn touch(&mut self) {
        self.updated_at = unix_now();
    }
}
