// fixtures.rs: raw card blocks and identifiers used across tests

use farecard::config::IdentifierPolicy;
use farecard::types::{BlockData, CardIdentifier};

/// "RA123ABC" padded with spaces to 16 bytes
pub const PLATE_RA123ABC_HEX: &str = "52413132334142432020202020202020";

/// 1000.0f32 little-endian followed by zero fill
pub const BALANCE_1000_HEX: &str = "00007a44000000000000000000000000";

/// 750.0f32 little-endian followed by zero fill
pub const BALANCE_750_HEX: &str = "00803b44000000000000000000000000";

/// 100.0f32 little-endian followed by zero fill
pub const BALANCE_100_HEX: &str = "0000c842000000000000000000000000";

pub fn block_from_hex(s: &str) -> BlockData {
    let bytes = hex::decode(s).unwrap();
    BlockData::try_from(&bytes[..]).unwrap()
}

pub fn strict() -> IdentifierPolicy {
    IdentifierPolicy::strict()
}

pub fn sample_plate() -> CardIdentifier {
    CardIdentifier::parse("RA123ABC", &strict()).unwrap()
}
