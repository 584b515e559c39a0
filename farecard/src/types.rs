// farecard/src/types.rs

use std::convert::TryFrom;
use std::fmt::Write as _;

use derive_more::{AsRef, Display};

use crate::config::IdentifierPolicy;
use crate::constants::{BLOCK_SIZE, DEFAULT_KEY_BYTES, MAX_IDENTIFIER_LEN};
use crate::{Error, Result};

/// Card block number
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u8);

impl BlockId {
    pub const PLATE: Self = Self(crate::constants::PLATE_BLOCK_NUMBER);
    pub const BALANCE: Self = Self(crate::constants::BALANCE_BLOCK_NUMBER);

    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

/// BlockData (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockData([u8; BLOCK_SIZE]);

impl BlockData {
    pub fn from_bytes(bytes: [u8; BLOCK_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; BLOCK_SIZE] {
        &self.0
    }

    /// Space separated lowercase hex, for log output.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(BLOCK_SIZE * 3);
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                s.push(' ');
            }
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }

    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != BLOCK_SIZE {
            return Err(Error::InvalidLength {
                expected: BLOCK_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; BLOCK_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Sector authentication key (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key([u8; 6]);

impl Key {
    pub const DEFAULT: Self = Self(DEFAULT_KEY_BYTES);

    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Plate identifier stored on the card: 1-16 ASCII alphanumerics,
/// optionally starting with a region prefix.
#[derive(Debug, Display, AsRef, Clone, PartialEq, Eq, Hash)]
#[as_ref(forward)]
pub struct CardIdentifier(String);

impl CardIdentifier {
    /// Validate `text` against the identifier rules and `policy`.
    ///
    /// The text is taken as-is; callers trim operator input first.
    pub fn parse(text: &str, policy: &IdentifierPolicy) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::InvalidIdentifier("empty identifier".into()));
        }
        if text.len() > MAX_IDENTIFIER_LEN {
            return Err(Error::InvalidIdentifier(format!(
                "{} characters, at most {} allowed",
                text.len(),
                MAX_IDENTIFIER_LEN
            )));
        }
        if let Some(bad) = text.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidIdentifier(format!(
                "non-alphanumeric character {:?}",
                bad
            )));
        }
        if let Some(prefix) = policy.region_prefix.as_deref() {
            if !text.starts_with(prefix) {
                return Err(Error::InvalidIdentifier(format!(
                    "{} does not start with region prefix {}",
                    text, prefix
                )));
            }
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored card balance. Always finite and non-negative.
#[derive(Debug, Display, Clone, Copy, PartialEq, PartialOrd)]
#[display(fmt = "{:.2}", _0)]
pub struct Balance(f32);

impl Balance {
    pub const ZERO: Self = Self(0.0);

    pub fn new(value: f32) -> Result<Self> {
        if value.is_nan() {
            return Err(Error::InvalidBalance("not a number".into()));
        }
        if value.is_infinite() {
            return Err(Error::InvalidBalance("infinite".into()));
        }
        if value < 0.0 {
            return Err(Error::InvalidBalance(format!("{} is negative", value)));
        }
        // folds -0.0 into 0.0
        Ok(Self(if value == 0.0 { 0.0 } else { value }))
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Balance left after paying `fare`, or `None` when funds are short.
    pub fn debit(self, fare: Fare) -> Option<Balance> {
        if fare.value() > self.0 {
            return None;
        }
        let left = self.0 - fare.value();
        Some(Self(if left <= 0.0 { 0.0 } else { left }))
    }
}

/// Amount due for one payment. Always finite and strictly positive.
#[derive(Debug, Display, Clone, Copy, PartialEq, PartialOrd)]
#[display(fmt = "{:.2}", _0)]
pub struct Fare(f32);

impl Fare {
    pub fn new(value: f32) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidAmount(format!("{} is not finite", value)));
        }
        if value <= 0.0 {
            return Err(Error::InvalidAmount(format!("{} is not positive", value)));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Logical content of one card, split across the plate and balance blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub identifier: CardIdentifier,
    pub balance: Balance,
}

impl CardRecord {
    pub fn new(identifier: CardIdentifier, balance: Balance) -> Self {
        Self {
            identifier,
            balance,
        }
    }
}
