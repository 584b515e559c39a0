// farecard/src/storage/traits.rs

use crate::Result;
use crate::types::{BlockData, BlockId, Key};

/// CardStorage abstracts the radio front end away from workflow logic.
///
/// Every call is attempted once; implementations must not retry internally.
pub trait CardStorage {
    /// True once per fresh card presentation. A card that has been halted is
    /// not reported again until it re-enters the field.
    fn detect_card(&mut self) -> bool;

    /// Authenticate the sector holding `block` with `key`
    fn authenticate(&mut self, block: BlockId, key: &Key) -> Result<()>;

    /// Read the full 16 bytes of `block`
    fn read_block(&mut self, block: BlockId) -> Result<BlockData>;

    /// Write the full 16 bytes of `block` in one call
    fn write_block(&mut self, block: BlockId, data: &BlockData) -> Result<()>;

    /// Put the card to sleep so it is not re-detected
    fn halt(&mut self);

    /// Leave the authenticated state
    fn stop_crypto(&mut self);
}
