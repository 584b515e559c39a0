// farecard/src/protocol/command.rs

//! Inbound operator lines.

use crate::constants::{FARE_PREFIX, REGISTER_COMMAND, STATUS_COMMAND};
use crate::types::Fare;
use crate::{Error, Result};

/// Top-level command recognised by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register,
    Status,
    Unknown(String),
}

impl Command {
    /// Classify a non-blank line. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn parse(line: &str) -> Self {
        let word = line.trim();
        if word.eq_ignore_ascii_case(REGISTER_COMMAND) {
            Command::Register
        } else if word.eq_ignore_ascii_case(STATUS_COMMAND) {
            Command::Status
        } else {
            Command::Unknown(word.to_string())
        }
    }
}

/// Parse a fare line: `PAY:<amount>` or a bare `<amount>`.
pub fn parse_fare(line: &str) -> Result<Fare> {
    let text = line.trim();
    let amount = text.strip_prefix(FARE_PREFIX).unwrap_or(text).trim();
    let value: f32 = amount
        .parse()
        .map_err(|_| Error::InvalidAmount(format!("{:?} is not a number", amount)))?;
    Fare::new(value)
}

/// Parse a decimal balance entered by the operator. Range checks are left to
/// the caller's policy.
pub fn parse_decimal(line: &str) -> Result<f32> {
    let text = line.trim();
    let value: f32 = text
        .parse()
        .map_err(|_| Error::InvalidBalance(format!("{:?} is not a number", text)))?;
    if !value.is_finite() {
        return Err(Error::InvalidBalance(format!("{} is not finite", value)));
    }
    Ok(value)
}
