// farecard/src/terminal/builder.rs

use crate::channel::LineChannel;
use crate::clock::{Clock, SystemClock};
use crate::config::TerminalConfig;
use crate::storage::CardStorage;
use crate::terminal::Terminal;
use crate::{Error, Result};

/// Helper to assemble a Terminal from boxed components.
pub struct TerminalBuilder {
    storage: Option<Box<dyn CardStorage>>,
    channel: Option<Box<dyn LineChannel>>,
    clock: Option<Box<dyn Clock>>,
    config: TerminalConfig,
}

impl TerminalBuilder {
    pub fn new() -> Self {
        Self {
            storage: None,
            channel: None,
            clock: None,
            config: TerminalConfig::default(),
        }
    }

    /// Card reader front end (e.g. MockCard)
    pub fn with_storage(mut self, storage: Box<dyn CardStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Operator/host line (e.g. StreamChannel over a serial port)
    pub fn with_channel(mut self, channel: Box<dyn LineChannel>) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Defaults to SystemClock
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_config(mut self, config: TerminalConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder. Storage and channel are required; otherwise
    /// returns MissingComponent.
    pub fn build(self) -> Result<Terminal> {
        let storage = self.storage.ok_or(Error::MissingComponent("card storage"))?;
        let channel = self.channel.ok_or(Error::MissingComponent("line channel"))?;
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock::new()));
        Ok(Terminal::from_parts(storage, channel, clock, self.config))
    }
}

impl Default for TerminalBuilder {
    fn default() -> Self {
        Self::new()
    }
}
