// farecard/src/storage/session.rs

use log::{debug, trace};

use crate::Result;
use crate::storage::traits::CardStorage;
use crate::types::{BlockData, BlockId, Key};

/// Exclusive access to the card currently in the field.
///
/// Closing the session stops crypto and halts the card, so the next
/// presentation (even of the same card) is detected as fresh. `close` is
/// idempotent and also runs on drop, which covers every early return.
pub struct CardSession<'a> {
    storage: &'a mut dyn CardStorage,
    key: Key,
    closed: bool,
}

impl<'a> CardSession<'a> {
    /// Take over a card that `detect_card` has just reported.
    pub fn open(storage: &'a mut dyn CardStorage, key: Key) -> Self {
        debug!("card session opened");
        Self {
            storage,
            key,
            closed: false,
        }
    }

    pub fn authenticate(&mut self, block: BlockId) -> Result<()> {
        trace!("authenticate block {}", block);
        self.storage.authenticate(block, &self.key)
    }

    pub fn read(&mut self, block: BlockId) -> Result<BlockData> {
        let data = self.storage.read_block(block)?;
        trace!("read block {}: {}", block, data.to_hex());
        Ok(data)
    }

    pub fn write(&mut self, block: BlockId, data: &BlockData) -> Result<()> {
        trace!("write block {}: {}", block, data.to_hex());
        self.storage.write_block(block, data)
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.storage.stop_crypto();
        self.storage.halt();
        debug!("card session closed");
    }
}

impl Drop for CardSession<'_> {
    fn drop(&mut self) {
        self.close();
    }
}
