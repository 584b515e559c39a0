#[path = "../common/mod.rs"]
mod common;

use std::collections::VecDeque;
use std::time::Duration;

use common::fixtures::{block_from_hex, BALANCE_1000_HEX, PLATE_RA123ABC_HEX};
use farecard::channel::{LineChannel, MockChannel};
use farecard::clock::{Clock, MockClock};
use farecard::config::TerminalConfig;
use farecard::protocol::Fault;
use farecard::storage::MockCard;
use farecard::types::{BlockData, BlockId, Key};
use farecard::workflow::{register, Operator, RegistrationOutcome};
use farecard::Result;

fn run(card: &MockCard, channel: &MockChannel, config: &TerminalConfig) -> RegistrationOutcome {
    let mut storage = card.clone();
    let mut channel = channel.clone();
    let mut clock = MockClock::new();
    let mut operator = Operator::new(&mut channel, &mut clock, config);
    register(&mut storage, &mut operator)
}

#[test]
fn registration_writes_expected_blocks() {
    let card = MockCard::new();
    card.present();
    let channel = MockChannel::new();
    channel.reply_to("ENTER_PLATE", " RA123ABC \r");
    channel.reply_to("ENTER_BALANCE", "1000.00");

    let outcome = run(&card, &channel, &TerminalConfig::strict());
    assert!(matches!(outcome, RegistrationOutcome::Registered(_)));
    assert_eq!(card.block(BlockId::PLATE), block_from_hex(PLATE_RA123ABC_HEX));
    assert_eq!(card.block(BlockId::BALANCE), block_from_hex(BALANCE_1000_HEX));
}

#[test]
fn rejected_identifier_aborts_before_any_card_access() {
    for bad in ["XY12!!", "RA 12", "", "RA12345678901234567"] {
        let card = MockCard::new();
        card.present();
        let channel = MockChannel::new();
        channel.reply_to("ENTER_PLATE", bad);

        let outcome = run(&card, &channel, &TerminalConfig::strict());
        assert_eq!(outcome, RegistrationOutcome::Failed(Fault::InvalidPlate), "{:?}", bad);
        assert!(card.calls().is_empty());
    }
}

#[test]
fn wrong_key_fails_plate_authentication() {
    let card = MockCard::new();
    card.present();
    card.set_key(Key::from_bytes([0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5]));
    let channel = MockChannel::new();
    channel.reply_to("ENTER_PLATE", "RA1");
    channel.reply_to("ENTER_BALANCE", "5");

    let outcome = run(&card, &channel, &TerminalConfig::strict());
    assert_eq!(outcome, RegistrationOutcome::Failed(Fault::AuthPlate));
    assert_eq!(channel.last_sent().as_deref(), Some("ERROR:AUTH_PLATE"));
    assert!(card.is_halted());
}

#[test]
fn card_pulled_during_balance_write_leaves_new_plate() {
    let card = MockCard::new();
    let previous = BlockData::from_bytes(*b"RAOLD1          ");
    card.set_block(BlockId::PLATE, previous);
    card.present();
    // auth plate, snapshot read, plate write, auth balance; then it is gone
    card.vanish_after(4);
    let channel = MockChannel::new();
    channel.reply_to("ENTER_PLATE", "RA2");
    channel.reply_to("ENTER_BALANCE", "5");

    let outcome = run(&card, &channel, &TerminalConfig::strict());
    assert_eq!(outcome, RegistrationOutcome::Failed(Fault::WriteBalance));
    // the compensating write could not reach the card either
    assert_ne!(card.block(BlockId::PLATE), previous);
}

/// Operator line that stays silent until the shared clock reaches `ready_at`.
struct SlowOperator {
    clock: MockClock,
    ready_at: Duration,
    answers: VecDeque<String>,
}

impl LineChannel for SlowOperator {
    fn send_line(&mut self, _line: &str) -> Result<()> {
        Ok(())
    }

    fn poll_line(&mut self) -> Result<Option<String>> {
        if self.clock.now() < self.ready_at {
            return Ok(None);
        }
        Ok(self.answers.pop_front())
    }
}

#[test]
fn permissive_waits_for_slow_operator() {
    let card = MockCard::new();
    card.present();
    let clock = MockClock::new();
    let config = TerminalConfig::permissive().with_registration_timeout(None);
    let mut channel = SlowOperator {
        clock: clock.clone(),
        ready_at: Duration::from_secs(60),
        answers: VecDeque::from(vec!["any1".to_string(), "0".to_string()]),
    };

    let mut storage = card.clone();
    let mut clk = clock.clone();
    let mut operator = Operator::new(&mut channel, &mut clk, &config);
    let outcome = register(&mut storage, &mut operator);

    assert!(matches!(outcome, RegistrationOutcome::Registered(_)));
    assert!(clock.now() >= Duration::from_secs(60));
}

#[test]
fn strict_gives_up_on_slow_operator() {
    let card = MockCard::new();
    card.present();
    let clock = MockClock::new();
    let config = TerminalConfig::strict();
    let mut channel = SlowOperator {
        clock: clock.clone(),
        ready_at: Duration::from_secs(60),
        answers: VecDeque::from(vec!["RA1".to_string(), "5".to_string()]),
    };

    let mut storage = card.clone();
    let mut clk = clock.clone();
    let mut operator = Operator::new(&mut channel, &mut clk, &config);

    assert_eq!(
        register(&mut storage, &mut operator),
        RegistrationOutcome::Failed(Fault::Timeout)
    );
    assert!(clock.now() < Duration::from_secs(60));
    assert!(card.calls().is_empty());
}
