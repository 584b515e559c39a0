// farecard/src/lib.rs

//! farecard
//!
//! Contactless fare card terminal: a 16-byte block codec for the plate and
//! balance records, registration and payment workflows, and the line-oriented
//! dispatcher that ties them to a card reader and an operator link.
#![warn(missing_docs)]

pub mod channel;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod storage;
pub mod terminal;
pub mod test_support;
pub mod types;
pub mod workflow;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
