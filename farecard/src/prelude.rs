// farecard/src/prelude.rs

pub use crate::channel::{LineChannel, MockChannel};
#[cfg(feature = "std")]
pub use crate::channel::StreamChannel;
pub use crate::clock::{Clock, MockClock, SystemClock};
pub use crate::config::{IdentifierPolicy, InitialBalancePolicy, Profile, PromptStyle, TerminalConfig};
pub use crate::protocol::{CardReport, Command, Fault, FaultKind, Reply, TerminalReply};
pub use crate::storage::{CardSession, CardStorage, MockCard};
pub use crate::terminal::{CommandOutcome, Cycle, Terminal, TerminalBuilder};
pub use crate::workflow::{PaymentOutcome, RegistrationOutcome};
pub use crate::{
    Balance, BlockData, BlockId, CardIdentifier, CardRecord, Error, Fare, Key, Result, WaitPoint,
};
