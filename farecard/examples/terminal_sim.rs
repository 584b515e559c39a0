//! Interactive terminal over stdin/stdout with a simulated card reader.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p farecard --example terminal_sim [-- --permissive]
//!
//! Type `TAP` to put the simulated card on the reader and `REMOVE` to take
//! it away. Every other line goes to the terminal, e.g. `REGISTER`,
//! `STATUS` or `PAY:250.00` after a tap.

use std::io::{self, BufReader, Stdout};

use anyhow::Context;
use farecard::channel::{LineChannel, StreamChannel};
use farecard::config::{Profile, TerminalConfig};
use farecard::storage::MockCard;
use farecard::{Result, Terminal};

/// Intercepts the simulator's own commands before the terminal sees them.
struct Simulator {
    inner: StreamChannel<Stdout>,
    card: MockCard,
}

impl LineChannel for Simulator {
    fn send_line(&mut self, line: &str) -> Result<()> {
        self.inner.send_line(line)
    }

    fn poll_line(&mut self) -> Result<Option<String>> {
        let Some(line) = self.inner.poll_line()? else {
            return Ok(None);
        };
        match line.trim() {
            "TAP" => {
                self.card.present();
                log::info!("card on reader");
                Ok(None)
            }
            "REMOVE" => {
                self.card.remove();
                log::info!("card removed");
                Ok(None)
            }
            _ => Ok(Some(line)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let profile = if std::env::args().any(|a| a == "--permissive") {
        Profile::Permissive
    } else {
        Profile::Strict
    };

    let card = MockCard::new();
    let channel = Simulator {
        inner: StreamChannel::spawn(BufReader::new(io::stdin()), io::stdout()),
        card: card.clone(),
    };

    let mut terminal = Terminal::builder()
        .with_storage(Box::new(card))
        .with_channel(Box::new(channel))
        .with_config(TerminalConfig::for_profile(profile))
        .build()
        .context("assembling terminal")?;

    eprintln!("{:?} profile; TAP / REMOVE drive the simulated card", profile);
    terminal.run()
}
