//! The block-content service

use crate::store::{BlockStore, InMemoryBlockStore};
use crate::ServiceError;
use block_drivers::DriverRegistry;
use block_types::Block;
use core_types::{BlockId, NoteId, ServiceId};
use ipc::{
    BlockResponse, ChangeTypeRequest, CreateBlockRequest, GetAsFirstRequest, GetBlockRequest,
    MessageEnvelope, OpBlockRequest, VersionPolicy, BLOCKNOTE_SCHEMA_VERSION, CHANGE_TYPE_ACTION,
    CREATE_BLOCK_ACTION, GET_AS_FIRST_ACTION, GET_BLOCK_ACTION, OP_BLOCK_ACTION,
    REGISTERED_TYPES_ACTION,
};
use rich_text::DataMap;
use serde_json::Value;

/// Owns the block records and dispatches every call to the driver
/// registered for the block's kind.
pub struct BlockNoteService<S: BlockStore = InMemoryBlockStore> {
    id: ServiceId,
    registry: DriverRegistry,
    store: S,
    policy: VersionPolicy,
}

impl BlockNoteService<InMemoryBlockStore> {
    /// Service backed by an in-memory store
    pub fn in_memory(registry: DriverRegistry) -> Self {
        Self::new(registry, InMemoryBlockStore::new())
    }
}

impl<S: BlockStore> BlockNoteService<S> {
    pub fn new(registry: DriverRegistry, store: S) -> Self {
        Self {
            id: ServiceId::new(),
            registry,
            store,
            policy: VersionPolicy::current(BLOCKNOTE_SCHEMA_VERSION),
        }
    }

    pub fn service_id(&self) -> ServiceId {
        self.id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn registered_types(&self) -> Vec<&'static str> {
        self.registry.registered_types()
    }

    /// Creates and stores a new block of type `block_type`
    pub fn create_block(
        &mut self,
        block_type: &str,
        note_id: NoteId,
        data: &DataMap,
    ) -> Result<Block, ServiceError> {
        let driver = self.registry.driver_for_tag(block_type)?;
        let payload = driver.create(data)?;
        let block = Block::new(driver.kind(), note_id, Some(payload));

        log::debug!("created {} block {} in {}", block.kind, block.id, note_id);
        self.store.put(block.clone());
        Ok(block)
    }

    /// Runs `op_name` on a block and stores the result.
    ///
    /// The block is marked in use for the duration of the call; a block
    /// that is already in use is rejected. The mark is cleared whether or
    /// not the op succeeds.
    ///
    /// `is_used` is part of the stored record. Calls through one service
    /// are serialized by `&mut self` and never see their own mark, so a
    /// rejection means another writer sharing the store holds the block.
    pub fn op_block(
        &mut self,
        id: BlockId,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, ServiceError> {
        let block = self.store.get_mut(id).ok_or(ServiceError::NotFound(id))?;
        if block.is_used {
            return Err(ServiceError::AlreadyInUse(id));
        }
        block.is_used = true;

        let result = Self::run_op(&self.registry, block, op_name, data);
        block.is_used = false;

        if let Err(err) = &result {
            log::warn!("op {} on block {} failed: {}", op_name, id, err);
        }
        result
    }

    fn run_op(
        registry: &DriverRegistry,
        block: &mut Block,
        op_name: &str,
        data: &DataMap,
    ) -> Result<Option<DataMap>, ServiceError> {
        let driver = registry.driver(block.kind)?;
        let updated = driver.op(block, op_name, data)?;
        if let Some(map) = &updated {
            block.data = Some(map.clone());
            block.touch();
        }
        Ok(updated)
    }

    /// Plain-text preview of a block
    pub fn get_as_first(&self, id: BlockId) -> Result<String, ServiceError> {
        let block = self.store.get(id).ok_or(ServiceError::NotFound(id))?;
        let driver = self.registry.driver(block.kind)?;
        Ok(driver.get_as_first(block))
    }

    /// Converts a block to `new_type`, keeping its id and note
    pub fn change_type(&mut self, id: BlockId, new_type: &str) -> Result<Block, ServiceError> {
        let block = self.store.get_mut(id).ok_or(ServiceError::NotFound(id))?;
        let driver = self.registry.driver(block.kind)?;
        driver.change_type(block, new_type)?;
        block.touch();
        Ok(block.clone())
    }

    pub fn get_block(&self, id: BlockId) -> Result<Block, ServiceError> {
        self.store
            .get(id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }

    pub fn blocks_for_note(&self, note: NoteId) -> Vec<Block> {
        self.store
            .blocks_for_note(note)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn delete_block(&mut self, id: BlockId) -> Result<Block, ServiceError> {
        self.store.remove(id).ok_or(ServiceError::NotFound(id))
    }

    /// Handles one request envelope and returns the correlated response.
    ///
    /// Failures of the request itself are reported inside the response;
    /// only a response that cannot be encoded is returned as an error.
    pub fn handle(&mut self, request: &MessageEnvelope) -> Result<MessageEnvelope, ServiceError> {
        let response = match self.dispatch(request) {
            Ok(Some(output)) => BlockResponse::ok(output),
            Ok(None) => BlockResponse::ok_empty(),
            Err(err) => {
                log::warn!("{} {} failed: {}", request.action, request.id, err);
                BlockResponse::error(err.to_response_error())
            }
        };
        Ok(response.into_envelope(request.destination, request.id)?)
    }

    fn dispatch(&mut self, request: &MessageEnvelope) -> Result<Option<Value>, ServiceError> {
        self.policy.require(self.id, request.schema_version)?;
        let payload = &request.payload;

        match request.action.as_str() {
            CREATE_BLOCK_ACTION => {
                let req: CreateBlockRequest = payload.deserialize()?;
                let block = self.create_block(&req.block_type, req.note_id, &req.data)?;
                Ok(Some(serde_json::to_value(block)?))
            }
            OP_BLOCK_ACTION => {
                let req: OpBlockRequest = payload.deserialize()?;
                let updated = self.op_block(req.block_id, &req.op_name, &req.data)?;
                Ok(updated.map(Value::Object))
            }
            GET_AS_FIRST_ACTION => {
                let req: GetAsFirstRequest = payload.deserialize()?;
                Ok(Some(Value::String(self.get_as_first(req.block_id)?)))
            }
            CHANGE_TYPE_ACTION => {
                let req: ChangeTypeRequest = payload.deserialize()?;
                let block = self.change_type(req.block_id, &req.new_type)?;
                Ok(Some(serde_json::to_value(block)?))
            }
            GET_BLOCK_ACTION => {
                let req: GetBlockRequest = payload.deserialize()?;
                Ok(Some(serde_json::to_value(self.get_block(req.block_id)?)?))
            }
            REGISTERED_TYPES_ACTION => Ok(Some(serde_json::to_value(self.registered_types())?)),
            other => Err(ServiceError::UnknownAction(other.to_string())),
        }
    }
}
