// farecard/src/protocol/reply.rs

//! Outbound lines: prompts, the card report line, outcome tokens and faults.

use thiserror::Error;

use crate::config::PromptStyle;
use crate::types::{Balance, CardIdentifier};

pub const DONE: &str = "DONE";
pub const INSUFFICIENT: &str = "INSUFFICIENT";
pub const READY: &str = "READY";
pub const ERROR_PREFIX: &str = "ERROR:";
pub const UNKNOWN_COMMAND_TOKEN: &str = "ERROR:UNKNOWN_COMMAND";

/// Broad class of a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    InvalidInput,
    AuthenticationFailure,
    IoFailure,
    Timeout,
}

/// Reason a registration or payment workflow ended without success.
///
/// `Display` gives the prose sentence; `token()` gives the wire token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("Authentication failed on the plate block")]
    AuthPlate,
    #[error("Could not read the plate block")]
    ReadPlate,
    #[error("Plate number on the card is invalid")]
    InvalidPlate,
    #[error("Could not write the plate block")]
    WritePlate,
    #[error("Authentication failed on the balance block")]
    AuthBalance,
    #[error("Could not read the balance block")]
    ReadBalance,
    #[error("Balance is invalid")]
    InvalidBalance,
    #[error("Could not write the balance block")]
    WriteBalance,
    #[error("Timed out waiting for input")]
    Timeout,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Authentication failed before writing the new balance")]
    AuthWrite,
    #[error("Failed to write the new balance")]
    WriteFailed,
}

impl Fault {
    pub const ALL: [Fault; 12] = [
        Fault::AuthPlate,
        Fault::ReadPlate,
        Fault::InvalidPlate,
        Fault::WritePlate,
        Fault::AuthBalance,
        Fault::ReadBalance,
        Fault::InvalidBalance,
        Fault::WriteBalance,
        Fault::Timeout,
        Fault::InvalidAmount,
        Fault::AuthWrite,
        Fault::WriteFailed,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Fault::AuthPlate => "ERROR:AUTH_PLATE",
            Fault::ReadPlate => "ERROR:READ_PLATE",
            Fault::InvalidPlate => "ERROR:INVALID_PLATE",
            Fault::WritePlate => "ERROR:WRITE_PLATE",
            Fault::AuthBalance => "ERROR:AUTH_BALANCE",
            Fault::ReadBalance => "ERROR:READ_BALANCE",
            Fault::InvalidBalance => "ERROR:INVALID_BALANCE",
            Fault::WriteBalance => "ERROR:WRITE_BALANCE",
            Fault::Timeout => "ERROR:TIMEOUT",
            Fault::InvalidAmount => "ERROR:INVALID_AMOUNT",
            Fault::AuthWrite => "ERROR:AUTH_WRITE",
            Fault::WriteFailed => "ERROR:WRITE_FAILED",
        }
    }

    pub fn from_token(token: &str) -> Option<Fault> {
        Fault::ALL.into_iter().find(|f| f.token() == token)
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::InvalidPlate | Fault::InvalidBalance | Fault::InvalidAmount => {
                FaultKind::InvalidInput
            }
            Fault::AuthPlate | Fault::AuthBalance | Fault::AuthWrite => {
                FaultKind::AuthenticationFailure
            }
            Fault::ReadPlate
            | Fault::WritePlate
            | Fault::ReadBalance
            | Fault::WriteBalance
            | Fault::WriteFailed => FaultKind::IoFailure,
            Fault::Timeout => FaultKind::Timeout,
        }
    }
}

/// Operator prompts sent during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    Identifier,
    Balance,
    PresentCard,
}

impl Prompt {
    fn render(&self, style: PromptStyle) -> &'static str {
        match (self, style) {
            (Prompt::Identifier, PromptStyle::Tokenized) => "ENTER_PLATE",
            (Prompt::Balance, PromptStyle::Tokenized) => "ENTER_BALANCE",
            (Prompt::PresentCard, PromptStyle::Tokenized) => "PRESENT_CARD",
            (Prompt::Identifier, PromptStyle::Prose) => "Enter plate number:",
            (Prompt::Balance, PromptStyle::Prose) => "Enter initial balance:",
            (Prompt::PresentCard, PromptStyle::Prose) => "Place the card on the reader...",
        }
    }
}

/// A single outbound line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Prompt(Prompt),
    /// Payment report line; identical in every style.
    CardReport {
        identifier: CardIdentifier,
        balance: Balance,
    },
    Registered {
        identifier: CardIdentifier,
        balance: Balance,
    },
    Done,
    Insufficient,
    Ready,
    Fault(Fault),
    UnknownCommand(String),
}

/// `PLATE:<identifier>;BALANCE:<balance to 2 decimals>`
pub fn report_line(identifier: &CardIdentifier, balance: Balance) -> String {
    format!("PLATE:{};BALANCE:{}", identifier, balance)
}

impl Reply {
    pub fn render(&self, style: PromptStyle) -> String {
        match self {
            Reply::Prompt(prompt) => prompt.render(style).to_string(),
            Reply::CardReport {
                identifier,
                balance,
            } => report_line(identifier, *balance),
            Reply::Registered {
                identifier,
                balance,
            } => match style {
                PromptStyle::Tokenized => {
                    format!("REGISTERED:{}", report_line(identifier, *balance))
                }
                PromptStyle::Prose => format!(
                    "Card registered. Plate: {}, Balance: {}",
                    identifier, balance
                ),
            },
            Reply::Done => DONE.to_string(),
            Reply::Insufficient => INSUFFICIENT.to_string(),
            Reply::Ready => READY.to_string(),
            Reply::Fault(fault) => match style {
                PromptStyle::Tokenized => fault.token().to_string(),
                PromptStyle::Prose => fault.to_string(),
            },
            Reply::UnknownCommand(command) => match style {
                PromptStyle::Tokenized => UNKNOWN_COMMAND_TOKEN.to_string(),
                PromptStyle::Prose => format!("Unknown command: {}", command),
            },
        }
    }
}
