// farecard/src/error.rs

use derive_more::Display;
use thiserror::Error;

use crate::types::BlockId;

/// Point at which a workflow blocks waiting for the outside world.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum WaitPoint {
    #[display(fmt = "operator line")]
    OperatorLine,
    #[display(fmt = "card presentation")]
    CardPresentation,
}

/// Common error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid balance: {0}")]
    InvalidBalance(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid block length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("no card in the field")]
    NoCard,

    #[error("authentication failed for block {block}")]
    AuthFailed { block: BlockId },

    #[error("read failed for block {block}")]
    ReadFailed { block: BlockId },

    #[error("write failed for block {block}")]
    WriteFailed { block: BlockId },

    #[error("timed out waiting for {0}")]
    Timeout(WaitPoint),

    #[error("malformed line: {0}")]
    MalformedLine(String),

    #[error("channel error: {0}")]
    Channel(String),

    #[error("terminal is missing its {0}")]
    MissingComponent(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
