// farecard/src/protocol/codec.rs

//! Card block layout.
//!
//! Plate block: ASCII identifier, space padded to 16 bytes.
//! Balance block: IEEE-754 f32, little-endian, in bytes 0..4; bytes 4..16
//! are written as zero and ignored on read.

use crate::config::IdentifierPolicy;
use crate::constants::{BALANCE_FIELD_LEN, BLOCK_SIZE, IDENTIFIER_PAD};
use crate::types::{Balance, BlockData, CardIdentifier, CardRecord};
use crate::{Error, Result};

fn is_printable(b: u8) -> bool {
    (0x20..=0x7E).contains(&b)
}

/// Encode an already validated identifier into a plate block.
pub fn encode_identifier(identifier: &CardIdentifier) -> BlockData {
    let mut buf = [IDENTIFIER_PAD; BLOCK_SIZE];
    let bytes = identifier.as_str().as_bytes();
    buf[..bytes.len()].copy_from_slice(bytes);
    BlockData::from_bytes(buf)
}

/// Validate `text` under `policy` and encode it into a plate block.
pub fn encode_identifier_str(text: &str, policy: &IdentifierPolicy) -> Result<BlockData> {
    let identifier = CardIdentifier::parse(text, policy)?;
    Ok(encode_identifier(&identifier))
}

/// Decode a plate block.
///
/// Everything from the first non-printable byte on is padding; trailing
/// whitespace is trimmed before validation.
pub fn decode_identifier(block: &BlockData, policy: &IdentifierPolicy) -> Result<CardIdentifier> {
    let bytes = block.as_bytes();
    let end = bytes
        .iter()
        .position(|&b| !is_printable(b))
        .unwrap_or(BLOCK_SIZE);
    let text = std::str::from_utf8(&bytes[..end])
        .map_err(|e| Error::InvalidIdentifier(e.to_string()))?;
    CardIdentifier::parse(text.trim_end(), policy)
}

pub fn encode_balance(balance: Balance) -> BlockData {
    let mut buf = [0u8; BLOCK_SIZE];
    buf[..BALANCE_FIELD_LEN].copy_from_slice(&balance.value().to_le_bytes());
    BlockData::from_bytes(buf)
}

/// Decode a balance block, rejecting NaN, infinite and negative values.
pub fn decode_balance(block: &BlockData) -> Result<Balance> {
    let [b0, b1, b2, b3, ..] = *block.as_bytes();
    Balance::new(f32::from_le_bytes([b0, b1, b2, b3]))
}

/// Encode a record into its (plate, balance) block pair.
pub fn encode_record(record: &CardRecord) -> (BlockData, BlockData) {
    (
        encode_identifier(&record.identifier),
        encode_balance(record.balance),
    )
}

pub fn decode_record(
    plate: &BlockData,
    balance: &BlockData,
    policy: &IdentifierPolicy,
) -> Result<CardRecord> {
    Ok(CardRecord::new(
        decode_identifier(plate, policy)?,
        decode_balance(balance)?,
    ))
}
