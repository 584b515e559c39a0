// farecard/src/config.rs
//! Terminal configuration.
//!
//! The strict and permissive profiles differ only in the values set here;
//! both run through the same workflow code.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{CARD_TIMEOUT, DEFAULT_REGION_PREFIX, OPERATOR_TIMEOUT, POLL_INTERVAL};
use crate::types::Key;

/// Named behaviour profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Profile {
    #[default]
    Strict,
    Permissive,
}

/// How replies other than the report line and outcome tokens are worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PromptStyle {
    /// Machine-readable tokens such as `ERROR:TIMEOUT`
    Tokenized,
    /// Human-readable sentences
    Prose,
}

/// Rules applied to plate identifiers on top of the alphanumeric/length check.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IdentifierPolicy {
    pub region_prefix: Option<String>,
}

impl IdentifierPolicy {
    /// Require the default region prefix.
    pub fn strict() -> Self {
        Self {
            region_prefix: Some(DEFAULT_REGION_PREFIX.to_string()),
        }
    }

    /// Accept any alphanumeric identifier.
    pub fn any() -> Self {
        Self {
            region_prefix: None,
        }
    }
}

impl Default for IdentifierPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

/// Lower bound for the balance entered at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitialBalancePolicy {
    /// Must be > 0
    Positive,
    /// Must be >= 0
    NonNegative,
}

impl InitialBalancePolicy {
    pub fn admits(&self, value: f32) -> bool {
        match self {
            Self::Positive => value > 0.0,
            Self::NonNegative => value >= 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerminalConfig {
    pub prompt_style: PromptStyle,
    pub identifier_policy: IdentifierPolicy,
    pub initial_balance: InitialBalancePolicy,
    /// `None` waits for registration input forever
    pub registration_timeout: Option<Duration>,
    pub fare_timeout: Duration,
    pub card_timeout: Duration,
    pub poll_interval: Duration,
    pub report_unknown_commands: bool,
    /// Restore the previous plate block if the balance write of a
    /// registration fails.
    pub rollback_partial_registration: bool,
    pub key: Key,
}

impl TerminalConfig {
    pub fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Strict => Self::strict(),
            Profile::Permissive => Self::permissive(),
        }
    }

    pub fn strict() -> Self {
        Self {
            prompt_style: PromptStyle::Tokenized,
            identifier_policy: IdentifierPolicy::strict(),
            initial_balance: InitialBalancePolicy::Positive,
            registration_timeout: Some(OPERATOR_TIMEOUT),
            fare_timeout: OPERATOR_TIMEOUT,
            card_timeout: CARD_TIMEOUT,
            poll_interval: POLL_INTERVAL,
            report_unknown_commands: true,
            rollback_partial_registration: true,
            key: Key::DEFAULT,
        }
    }

    pub fn permissive() -> Self {
        Self {
            prompt_style: PromptStyle::Prose,
            identifier_policy: IdentifierPolicy::any(),
            initial_balance: InitialBalancePolicy::NonNegative,
            registration_timeout: None,
            report_unknown_commands: false,
            ..Self::strict()
        }
    }

    pub fn with_prompt_style(mut self, style: PromptStyle) -> Self {
        self.prompt_style = style;
        self
    }

    pub fn with_identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.identifier_policy = policy;
        self
    }

    pub fn with_registration_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.registration_timeout = timeout;
        self
    }

    pub fn with_fare_timeout(mut self, timeout: Duration) -> Self {
        self.fare_timeout = timeout;
        self
    }

    pub fn with_card_timeout(mut self, timeout: Duration) -> Self {
        self.card_timeout = timeout;
        self
    }

    pub fn with_rollback(mut self, enabled: bool) -> Self {
        self.rollback_partial_registration = enabled;
        self
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.key = key;
        self
    }
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self::strict()
    }
}
