//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize the mock card/channel/clock wiring so tests
//! across the crate and tests/ directory can reuse the same setup.
#![allow(dead_code)]

use crate::channel::MockChannel;
use crate::clock::MockClock;
use crate::config::{IdentifierPolicy, TerminalConfig};
use crate::storage::MockCard;
use crate::terminal::Terminal;
use crate::types::{Balance, CardIdentifier};
use crate::Result;

/// Handles kept by a test after the terminal took ownership of its parts.
/// All of them share state with the terminal's copies.
#[doc(hidden)]
pub struct MockRig {
    pub card: MockCard,
    pub channel: MockChannel,
    pub clock: MockClock,
}

/// Build a Terminal backed by fresh mocks and return it with their handles.
#[doc(hidden)]
pub fn mock_terminal(config: TerminalConfig) -> Result<(Terminal, MockRig)> {
    let rig = MockRig {
        card: MockCard::new(),
        channel: MockChannel::new(),
        clock: MockClock::new(),
    };
    let terminal = Terminal::builder()
        .with_storage(Box::new(rig.card.clone()))
        .with_channel(Box::new(rig.channel.clone()))
        .with_clock(Box::new(rig.clock.clone()))
        .with_config(config)
        .build()?;
    Ok((terminal, rig))
}

/// Identifier accepted under any policy; for fixtures only.
#[doc(hidden)]
pub fn plate(text: &str) -> Result<CardIdentifier> {
    CardIdentifier::parse(text, &IdentifierPolicy::any())
}

/// Write a plate and balance onto `card` as a completed registration would.
#[doc(hidden)]
pub fn seed_record(card: &MockCard, identifier: &str, balance: f32) -> Result<()> {
    card.load_record(&plate(identifier)?, Balance::new(balance)?);
    Ok(())
}

/// Script the operator answers of one tokenized registration.
#[doc(hidden)]
pub fn script_registration(channel: &MockChannel, identifier: &str, balance: &str) {
    channel.push_line("REGISTER");
    channel.reply_to("ENTER_PLATE", identifier);
    channel.reply_to("ENTER_BALANCE", balance);
}
