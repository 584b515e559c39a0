// farecard/src/protocol/mod.rs

pub mod codec;
pub mod command;
pub mod host;
pub mod reply;

pub use codec::{decode_balance, decode_identifier, encode_balance, encode_identifier};
pub use command::{Command, parse_fare};
pub use host::{CardReport, TerminalReply};
pub use reply::{Fault, FaultKind, Prompt, Reply};
