// farecard/src/workflow/mod.rs

//! Registration and payment workflows.
//!
//! Both run to completion against borrowed components and report exactly
//! one outcome line on the operator channel. Storage and channel errors are
//! mapped to a [`Fault`] at the step where they happen.

pub mod payment;
pub mod registration;

use std::time::Duration;

use log::warn;

use crate::channel::LineChannel;
use crate::clock::{Clock, Deadline};
use crate::config::TerminalConfig;
use crate::error::WaitPoint;
use crate::protocol::{Fault, Reply};
use crate::storage::CardStorage;
use crate::types::{Balance, CardIdentifier, CardRecord, Fare};
use crate::{Error, Result};

pub use payment::collect_fare;
pub use registration::register;

/// The operator side of a workflow: the line channel, the clock that bounds
/// every wait and the active configuration.
pub struct Operator<'a> {
    channel: &'a mut dyn LineChannel,
    clock: &'a mut dyn Clock,
    config: &'a TerminalConfig,
}

impl<'a> Operator<'a> {
    pub fn new(
        channel: &'a mut dyn LineChannel,
        clock: &'a mut dyn Clock,
        config: &'a TerminalConfig,
    ) -> Self {
        Self {
            channel,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &'a TerminalConfig {
        self.config
    }

    /// Send one reply in the configured style. A failed send cannot be
    /// reported to anyone, so it is only logged.
    pub fn say(&mut self, reply: &Reply) {
        let line = reply.render(self.config.prompt_style);
        if let Err(e) = self.channel.send_line(&line) {
            warn!("could not send {:?}: {}", line, e);
        }
    }

    /// Wait for the next operator line. `None` waits forever.
    pub fn await_line(&mut self, timeout: Option<Duration>) -> Result<String> {
        let deadline = Deadline::after(&*self.clock, timeout);
        loop {
            match self.channel.poll_line() {
                Ok(Some(line)) => return Ok(line),
                Ok(None) => {}
                Err(e) => warn!("operator channel: {}", e),
            }
            if deadline.expired(&*self.clock) {
                return Err(Error::Timeout(WaitPoint::OperatorLine));
            }
            self.clock.sleep(self.config.poll_interval);
        }
    }

    /// Poll `storage` until a fresh card shows up or `card_timeout` passes.
    pub fn await_card(&mut self, storage: &mut dyn CardStorage) -> Result<()> {
        let deadline = Deadline::after(&*self.clock, Some(self.config.card_timeout));
        loop {
            if storage.detect_card() {
                return Ok(());
            }
            if deadline.expired(&*self.clock) {
                return Err(Error::Timeout(WaitPoint::CardPresentation));
            }
            self.clock.sleep(self.config.poll_interval);
        }
    }
}

/// Map a failed step to its fault, logging the underlying error.
pub(crate) fn step<T>(result: Result<T>, fault: Fault) -> std::result::Result<T, Fault> {
    result.map_err(|e| {
        warn!("{}: {}", fault.token(), e);
        fault
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    Registered(CardRecord),
    Failed(Fault),
}

impl RegistrationOutcome {
    pub fn reply(&self) -> Reply {
        match self {
            RegistrationOutcome::Registered(record) => Reply::Registered {
                identifier: record.identifier.clone(),
                balance: record.balance,
            },
            RegistrationOutcome::Failed(fault) => Reply::Fault(*fault),
        }
    }

    pub fn fault(&self) -> Option<Fault> {
        match self {
            RegistrationOutcome::Failed(fault) => Some(*fault),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Paid {
        identifier: CardIdentifier,
        previous: Balance,
        remaining: Balance,
        fare: Fare,
    },
    /// Fare exceeds the balance; the card was not written.
    Declined {
        identifier: CardIdentifier,
        balance: Balance,
        fare: Fare,
    },
    Failed(Fault),
}

impl PaymentOutcome {
    pub fn reply(&self) -> Reply {
        match self {
            PaymentOutcome::Paid { .. } => Reply::Done,
            PaymentOutcome::Declined { .. } => Reply::Insufficient,
            PaymentOutcome::Failed(fault) => Reply::Fault(*fault),
        }
    }

    pub fn fault(&self) -> Option<Fault> {
        match self {
            PaymentOutcome::Failed(fault) => Some(*fault),
            _ => None,
        }
    }
}
