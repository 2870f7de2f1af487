//! Block storage seam
//!
//! The service only needs keyed access to block records. Durable storage
//! lives behind this trait; [`InMemoryBlockStore`] backs tests and the
//! daemon.

use block_types::Block;
use core_types::{BlockId, NoteId};
use std::collections::HashMap;

pub trait BlockStore {
    /// Inserts or replaces the record with `block.id`
    fn put(&mut self, block: Block);

    fn get(&self, id: BlockId) -> Option<&Block>;

    fn get_mut(&mut self, id: BlockId) -> Option<&mut Block>;

    fn remove(&mut self, id: BlockId) -> Option<Block>;

    /// Blocks of `note` in insertion order
    fn blocks_for_note(&self, note: NoteId) -> Vec<&Block>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered map of block records
#[derive(Debug, Default)]
pub struct InMemoryBlockStore {
    blocks: HashMap<BlockId, Block>,
    order: Vec<BlockId>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlockStore for InMemoryBlockStore {
    fn put(&mut self, block: Block) {
        let id = block.id;
        if self.blocks.insert(id, block).is_none() {
            self.order.push(id);
        }
    }

    fn get(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.get_mut(&id)
    }

    fn remove(&mut self, id: BlockId) -> Option<Block> {
        let removed = self.blocks.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(removed)
    }

    fn blocks_for_note(&self, note: NoteId) -> Vec<&Block> {
        self.order
            .iter()
            .filter_map(|id| self.blocks.get(id))
            .filter(|block| block.note_id == note)
            .collect()
    }

    fn len(&self) -> usize {
        self.blocks.len()
    }
}
