// farecard/src/constants.rs
//! Card layout and terminal timing constants used across the crate

use std::time::Duration;

/// Size of one addressable storage block on the card
pub const BLOCK_SIZE: usize = 16;

/// Block holding the space-padded plate identifier
pub const PLATE_BLOCK_NUMBER: u8 = 1;

/// Block holding the little-endian f32 balance
pub const BALANCE_BLOCK_NUMBER: u8 = 2;

/// Factory default authentication key (6 x 0xFF)
pub const DEFAULT_KEY_BYTES: [u8; 6] = [0xFF; 6];

/// Padding byte appended after the identifier characters
pub const IDENTIFIER_PAD: u8 = b' ';

/// Longest identifier that fits in a block
pub const MAX_IDENTIFIER_LEN: usize = BLOCK_SIZE;

/// Region prefix enforced by the strict identifier policy
pub const DEFAULT_REGION_PREFIX: &str = "RA";

/// Number of bytes of the balance block carrying the f32
pub const BALANCE_FIELD_LEN: usize = 4;

/// Operator-channel wait during registration (strict profile) and for fares
pub const OPERATOR_TIMEOUT: Duration = Duration::from_secs(10);

/// Card presentation wait during registration
pub const CARD_TIMEOUT: Duration = Duration::from_secs(20);

/// Sleep between polls of the channel or the card-detection signal
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Inbound command that starts the registration workflow
pub const REGISTER_COMMAND: &str = "REGISTER";

/// Inbound liveness probe
pub const STATUS_COMMAND: &str = "STATUS";

/// Prefix of the preferred fare line format (`PAY:<amount>`)
pub const FARE_PREFIX: &str = "PAY:";
