//! The per-kind driver contract

use block_types::{convert, Block, BlockError, BlockKind, BlockPayload, ConversionSource};
use rich_text::DataMap;

/// Implementation of one block kind
///
/// Drivers are stateless apart from their tuning; every call receives the
/// block it works on. Mutating calls never touch the block on failure.
pub trait BlockDriver: Send + Sync {
    /// Kind this driver serves
    fn kind(&self) -> BlockKind;

    /// Builds a validated wire payload from a raw creation map
    fn create(&self, data: &DataMap) -> Result<DataMap, BlockError>;

    /// Runs a named operation against `block`.
    ///
    /// Returns the updated payload for the caller to write back, or
    /// `Ok(None)` when the block has no payload to operate on.
    fn op(&self, block: &Block, op_name: &str, data: &DataMap)
        -> Result<Option<DataMap>, BlockError>;

    /// Plain-text preview; empty when the payload is absent or unreadable
    fn get_as_first(&self, block: &Block) -> String;

    /// Converts `block` in place to the payload named by `new_type`
    fn change_type(&self, block: &mut Block, new_type: &str) -> Result<(), BlockError>;
}

/// Decodes the block's payload with `parse`, `None` when absent
pub(crate) fn decode<T>(
    block: &Block,
    parse: impl FnOnce(&DataMap) -> Result<T, BlockError>,
) -> Result<Option<T>, BlockError> {
    block.data.as_ref().map(parse).transpose()
}

/// Converts and swaps in the new payload only once conversion succeeded
pub(crate) fn replace_payload(
    block: &mut Block,
    source: &ConversionSource<'_>,
    new_type: &str,
) -> Result<(), BlockError> {
    let from = block.kind;
    let payload: BlockPayload = convert(source, new_type)?;
    block.set_payload(&payload);
    log::debug!("block {} changed type {} -> {}", block.id, from, block.kind);
    Ok(())
}
