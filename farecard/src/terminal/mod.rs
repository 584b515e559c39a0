// farecard/src/terminal/mod.rs

//! The terminal's top-level polling loop.

pub mod builder;

pub use builder::TerminalBuilder;

use log::{debug, info, warn};

use crate::channel::LineChannel;
use crate::clock::Clock;
use crate::config::TerminalConfig;
use crate::protocol::{Command, Reply};
use crate::storage::CardStorage;
use crate::workflow::{self, Operator, PaymentOutcome, RegistrationOutcome};

/// What the dispatcher did with an operator line.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Registration(RegistrationOutcome),
    Status,
    Unknown(String),
}

/// Result of one dispatcher cycle. Both halves are `None` on an idle cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cycle {
    pub command: Option<CommandOutcome>,
    pub payment: Option<PaymentOutcome>,
}

impl Cycle {
    pub fn is_idle(&self) -> bool {
        self.command.is_none() && self.payment.is_none()
    }
}

/// A fare terminal: one card reader, one operator line, one clock.
pub struct Terminal {
    storage: Box<dyn CardStorage>,
    channel: Box<dyn LineChannel>,
    clock: Box<dyn Clock>,
    config: TerminalConfig,
}

impl Terminal {
    pub fn builder() -> TerminalBuilder {
        TerminalBuilder::new()
    }

    pub(crate) fn from_parts(
        storage: Box<dyn CardStorage>,
        channel: Box<dyn LineChannel>,
        clock: Box<dyn Clock>,
        config: TerminalConfig,
    ) -> Self {
        Self {
            storage,
            channel,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Handle at most one operator command, then at most one card.
    ///
    /// Both checks run every cycle whatever the other one did.
    pub fn poll_once(&mut self) -> Cycle {
        let command = self.poll_command();
        let payment = self.poll_card();
        Cycle { command, payment }
    }

    /// Run `cycles` dispatcher cycles, sleeping `poll_interval` between them.
    pub fn run_cycles(&mut self, cycles: usize) -> Vec<Cycle> {
        let mut out = Vec::with_capacity(cycles);
        for i in 0..cycles {
            if i != 0 {
                self.clock.sleep(self.config.poll_interval);
            }
            out.push(self.poll_once());
        }
        out
    }

    pub fn run(&mut self) -> ! {
        info!("terminal running");
        loop {
            self.poll_once();
            self.clock.sleep(self.config.poll_interval);
        }
    }

    fn poll_command(&mut self) -> Option<CommandOutcome> {
        let line = match self.channel.poll_line() {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => {
                warn!("operator channel: {}", e);
                return None;
            }
        };
        if line.trim().is_empty() {
            return None;
        }

        let mut operator = Operator::new(self.channel.as_mut(), self.clock.as_mut(), &self.config);
        match Command::parse(&line) {
            Command::Register => {
                debug!("dispatch: REGISTER");
                let outcome = workflow::register(self.storage.as_mut(), &mut operator);
                Some(CommandOutcome::Registration(outcome))
            }
            Command::Status => {
                debug!("dispatch: STATUS");
                operator.say(&Reply::Ready);
                Some(CommandOutcome::Status)
            }
            Command::Unknown(word) => {
                warn!("unknown command {:?}", word);
                if self.config.report_unknown_commands {
                    operator.say(&Reply::UnknownCommand(word.clone()));
                }
                Some(CommandOutcome::Unknown(word))
            }
        }
    }

    fn poll_card(&mut self) -> Option<PaymentOutcome> {
        if !self.storage.detect_card() {
            return None;
        }
        debug!("dispatch: card presented");
        let mut operator = Operator::new(self.channel.as_mut(), self.clock.as_mut(), &self.config);
        Some(workflow::collect_fare(self.storage.as_mut(), &mut operator))
    }
}
