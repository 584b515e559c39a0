// farecard/src/protocol/host.rs

//! The host controller's half of the line protocol.
//!
//! The host reads the terminal's report line, works out what is owed and
//! answers with a `PAY:` line, then waits for the outcome token.

use std::time::Duration;

use crate::config::IdentifierPolicy;
use crate::constants::FARE_PREFIX;
use crate::protocol::command::parse_fare;
use crate::protocol::reply::{DONE, INSUFFICIENT, READY};
use crate::protocol::Fault;
use crate::types::{Balance, CardIdentifier, Fare};
use crate::{Error, Result};

const PLATE_FIELD: &str = "PLATE:";
const BALANCE_FIELD: &str = "BALANCE:";
const LEGACY_BALANCE_FIELD: &str = "BAL:";

const SECONDS_PER_HOUR: u64 = 3600;

/// Plate and balance as reported by a terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct CardReport {
    pub identifier: CardIdentifier,
    pub balance: Balance,
}

impl CardReport {
    /// Parse `PLATE:<id>;BALANCE:<x>` or the older `PLATE:<id>;BAL:<x>`.
    ///
    /// The plate is upper-cased before validation.
    pub fn parse(line: &str, policy: &IdentifierPolicy) -> Result<Self> {
        let line = line.trim();
        let rest = line
            .strip_prefix(PLATE_FIELD)
            .ok_or_else(|| Error::MalformedLine(format!("missing {} in {:?}", PLATE_FIELD, line)))?;
        let (plate, balance) = rest
            .split_once(';')
            .ok_or_else(|| Error::MalformedLine(format!("missing balance in {:?}", line)))?;

        let balance = balance.trim();
        let amount = balance
            .strip_prefix(BALANCE_FIELD)
            .or_else(|| balance.strip_prefix(LEGACY_BALANCE_FIELD))
            .ok_or_else(|| Error::MalformedLine(format!("no balance field in {:?}", balance)))?;
        let value: f32 = amount
            .trim()
            .parse()
            .map_err(|_| Error::InvalidBalance(format!("{:?} is not a number", amount)))?;

        Ok(Self {
            identifier: CardIdentifier::parse(&plate.trim().to_ascii_uppercase(), policy)?,
            balance: Balance::new(value)?,
        })
    }
}

/// Line the host sends to charge `fare`.
///
/// Whole-cent fares use two decimals; any other fare is written in full so
/// the terminal parses back exactly the amount given here.
pub fn fare_command(fare: Fare) -> String {
    let cents = format!("{}{}", FARE_PREFIX, fare);
    if parse_fare(&cents).ok() == Some(fare) {
        cents
    } else {
        format!("{}{}", FARE_PREFIX, fare.value())
    }
}

/// A line received from the terminal, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalReply {
    Report(CardReport),
    Done,
    Insufficient,
    Ready,
    Fault(Fault),
    Other(String),
}

impl TerminalReply {
    /// Classify one line. Prose lines and prompts come back as `Other`.
    pub fn parse(line: &str, policy: &IdentifierPolicy) -> Self {
        let line = line.trim();
        match line {
            DONE => return TerminalReply::Done,
            INSUFFICIENT => return TerminalReply::Insufficient,
            READY => return TerminalReply::Ready,
            _ => {}
        }
        if let Some(fault) = Fault::from_token(line) {
            return TerminalReply::Fault(fault);
        }
        if line.starts_with(PLATE_FIELD) {
            if let Ok(report) = CardReport::parse(line, policy) {
                return TerminalReply::Report(report);
            }
        }
        TerminalReply::Other(line.to_string())
    }
}

/// Parking fare: whole hours parked (rounded down, at least one) times the
/// hourly rate, rounded to cents. A fare that rounds to zero is rejected.
pub fn hourly_fare(parked: Duration, rate_per_hour: f32) -> Result<Fare> {
    let hours = (parked.as_secs() / SECONDS_PER_HOUR).max(1);
    let cents = (hours as f32 * rate_per_hour * 100.0).round();
    Fare::new(cents / 100.0)
}
