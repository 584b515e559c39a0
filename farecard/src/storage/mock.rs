// farecard/src/storage/mock.rs

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::protocol::codec;
use crate::storage::traits::CardStorage;
use crate::types::{Balance, BlockData, BlockId, CardIdentifier, Key};
use crate::{Error, Result};

/// One recorded call against the mock, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageCall {
    Detect(bool),
    Authenticate(BlockId),
    Read(BlockId),
    Write(BlockId),
    Halt,
    StopCrypto,
}

#[derive(Debug, Default)]
struct CardState {
    blocks: BTreeMap<BlockId, BlockData>,
    key: Key,
    in_field: bool,
    selected: bool,
    halted: bool,
    crypto_active: bool,
    authenticated: BTreeSet<BlockId>,
    fail_auth: BTreeSet<BlockId>,
    fail_read: BTreeSet<BlockId>,
    fail_write: BTreeSet<BlockId>,
    /// Storage operations left before the card leaves the field
    vanish_after: Option<usize>,
    calls: Vec<StorageCall>,
}

impl CardState {
    fn leave_field(&mut self) {
        self.in_field = false;
        self.selected = false;
        self.crypto_active = false;
        self.authenticated.clear();
    }

    /// Count one radio operation against `vanish_after`.
    fn tick(&mut self) {
        if let Some(left) = self.vanish_after {
            if left == 0 {
                self.vanish_after = None;
                self.leave_field();
            } else {
                self.vanish_after = Some(left - 1);
            }
        }
    }

    fn reachable(&self) -> bool {
        self.in_field && self.selected
    }
}

/// In-memory card and reader for tests and simulations.
///
/// Clones share the same card, so a test can keep one handle for assertions
/// while the terminal owns another. Failures can be injected per block.
#[derive(Debug, Clone, Default)]
pub struct MockCard {
    state: Rc<RefCell<CardState>>,
}

impl MockCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the card (back) into the field as a fresh presentation.
    pub fn present(&self) {
        let mut s = self.state.borrow_mut();
        s.in_field = true;
        s.selected = false;
        s.halted = false;
    }

    pub fn remove(&self) {
        self.state.borrow_mut().leave_field();
    }

    /// Pull the card out of the field after `ops` more authenticate, read or
    /// write calls have completed.
    pub fn vanish_after(&self, ops: usize) {
        self.state.borrow_mut().vanish_after = Some(ops);
    }

    pub fn is_halted(&self) -> bool {
        self.state.borrow().halted
    }

    pub fn is_crypto_active(&self) -> bool {
        self.state.borrow().crypto_active
    }

    pub fn set_key(&self, key: Key) {
        self.state.borrow_mut().key = key;
    }

    /// Current block content; never-written blocks read as zeroes.
    pub fn block(&self, block: BlockId) -> BlockData {
        self.state
            .borrow()
            .blocks
            .get(&block)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_block(&self, block: BlockId, data: BlockData) {
        self.state.borrow_mut().blocks.insert(block, data);
    }

    /// Store an encoded plate and balance, as a registration would.
    pub fn load_record(&self, identifier: &CardIdentifier, balance: Balance) {
        self.set_block(BlockId::PLATE, codec::encode_identifier(identifier));
        self.set_block(BlockId::BALANCE, codec::encode_balance(balance));
    }

    pub fn fail_auth_on(&self, block: BlockId) {
        self.state.borrow_mut().fail_auth.insert(block);
    }

    pub fn fail_read_on(&self, block: BlockId) {
        self.state.borrow_mut().fail_read.insert(block);
    }

    pub fn fail_write_on(&self, block: BlockId) {
        self.state.borrow_mut().fail_write.insert(block);
    }

    pub fn clear_failures(&self) {
        let mut s = self.state.borrow_mut();
        s.fail_auth.clear();
        s.fail_read.clear();
        s.fail_write.clear();
        s.vanish_after = None;
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.state.borrow().calls.clone()
    }

    /// Blocks written so far, in order.
    pub fn writes(&self) -> Vec<BlockId> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|c| match c {
                StorageCall::Write(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

impl CardStorage for MockCard {
    fn detect_card(&mut self) -> bool {
        let mut s = self.state.borrow_mut();
        let fresh = s.in_field && !s.halted && !s.selected;
        if fresh {
            s.selected = true;
        }
        s.calls.push(StorageCall::Detect(fresh));
        fresh
    }

    fn authenticate(&mut self, block: BlockId, key: &Key) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.calls.push(StorageCall::Authenticate(block));
        s.tick();
        if !s.reachable() {
            return Err(Error::NoCard);
        }
        if s.fail_auth.contains(&block) || *key != s.key {
            return Err(Error::AuthFailed { block });
        }
        s.authenticated.insert(block);
        s.crypto_active = true;
        Ok(())
    }

    fn read_block(&mut self, block: BlockId) -> Result<BlockData> {
        let mut s = self.state.borrow_mut();
        s.calls.push(StorageCall::Read(block));
        s.tick();
        if !s.reachable() {
            return Err(Error::NoCard);
        }
        if !s.authenticated.contains(&block) || s.fail_read.contains(&block) {
            return Err(Error::ReadFailed { block });
        }
        Ok(s.blocks.get(&block).copied().unwrap_or_default())
    }

    fn write_block(&mut self, block: BlockId, data: &BlockData) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.calls.push(StorageCall::Write(block));
        s.tick();
        if !s.reachable() {
            return Err(Error::NoCard);
        }
        if !s.authenticated.contains(&block) || s.fail_write.contains(&block) {
            return Err(Error::WriteFailed { block });
        }
        s.blocks.insert(block, *data);
        Ok(())
    }

    fn halt(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(StorageCall::Halt);
        s.halted = true;
        s.selected = false;
    }

    fn stop_crypto(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(StorageCall::StopCrypto);
        s.crypto_active = false;
        s.authenticated.clear();
    }
}
