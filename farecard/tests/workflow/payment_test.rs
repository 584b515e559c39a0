#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{block_from_hex, BALANCE_100_HEX, BALANCE_750_HEX};
use farecard::channel::MockChannel;
use farecard::clock::MockClock;
use farecard::config::TerminalConfig;
use farecard::protocol::Fault;
use farecard::storage::{CardStorage, MockCard};
use farecard::test_support::seed_record;
use farecard::types::BlockId;
use farecard::workflow::{collect_fare, Operator, PaymentOutcome};

fn present(plate: &str, balance: f32) -> MockCard {
    let card = MockCard::new();
    seed_record(&card, plate, balance).unwrap();
    card.present();
    card
}

fn run(card: &MockCard, channel: &MockChannel) -> PaymentOutcome {
    let mut storage = card.clone();
    assert!(storage.detect_card());
    let mut channel = channel.clone();
    let mut clock = MockClock::new();
    let config = TerminalConfig::strict();
    let mut operator = Operator::new(&mut channel, &mut clock, &config);
    collect_fare(&mut storage, &mut operator)
}

#[test]
fn paid_fare_leaves_expected_block() {
    let card = present("RA123ABC", 1000.0);
    let channel = MockChannel::new();
    channel.reply_to("PLATE:", "PAY:250.00");

    match run(&card, &channel) {
        PaymentOutcome::Paid {
            previous,
            remaining,
            fare,
            ..
        } => {
            assert_eq!(previous.value(), 1000.0);
            assert_eq!(remaining.value(), 750.0);
            assert_eq!(fare.value(), 250.0);
        }
        other => panic!("expected payment, got {:?}", other),
    }
    assert_eq!(card.block(BlockId::BALANCE), block_from_hex(BALANCE_750_HEX));
}

#[test]
fn declined_fare_is_byte_for_byte_unchanged() {
    let card = present("RA123ABC", 100.0);
    let channel = MockChannel::new();
    channel.reply_to("PLATE:", "PAY:150.00");

    assert!(matches!(run(&card, &channel), PaymentOutcome::Declined { .. }));
    assert_eq!(card.block(BlockId::BALANCE), block_from_hex(BALANCE_100_HEX));
    assert_eq!(
        channel.sent(),
        vec!["PLATE:RA123ABC;BALANCE:100.00", "INSUFFICIENT"]
    );
}

#[test]
fn auth_failure_before_write_keeps_balance() {
    let card = present("RA1", 100.0);
    // plate auth, plate read, balance auth, balance read succeed
    card.vanish_after(4);
    let channel = MockChannel::new();
    channel.reply_to("PLATE:", "PAY:10");

    assert_eq!(run(&card, &channel), PaymentOutcome::Failed(Fault::AuthWrite));
    assert_eq!(channel.last_sent().as_deref(), Some("ERROR:AUTH_WRITE"));
    assert_eq!(card.block(BlockId::BALANCE), block_from_hex(BALANCE_100_HEX));
}

#[test]
fn late_fare_line_times_out() {
    let card = present("RA1", 100.0);
    let channel = MockChannel::new();

    assert_eq!(run(&card, &channel), PaymentOutcome::Failed(Fault::Timeout));
    assert_eq!(card.block(BlockId::BALANCE), block_from_hex(BALANCE_100_HEX));
    assert!(card.is_halted());
}
