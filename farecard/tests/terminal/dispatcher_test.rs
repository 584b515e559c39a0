#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{block_from_hex, BALANCE_100_HEX};
use farecard::config::TerminalConfig;
use farecard::protocol::codec::decode_balance;
use farecard::protocol::Fault;
use farecard::storage::StorageCall;
use farecard::terminal::CommandOutcome;
use farecard::test_support::{mock_terminal, script_registration, seed_record};
use farecard::types::BlockId;
use farecard::workflow::{PaymentOutcome, RegistrationOutcome};

#[test]
fn register_then_pay() {
    let (mut terminal, rig) = mock_terminal(TerminalConfig::strict()).unwrap();
    rig.card.present();
    script_registration(&rig.channel, "RA123ABC", "1000");

    let cycle = terminal.poll_once();
    assert!(matches!(
        cycle.command,
        Some(CommandOutcome::Registration(RegistrationOutcome::Registered(_)))
    ));
    // the card was halted by the registration, so no payment this cycle
    assert_eq!(cycle.payment, None);

    rig.channel.clear_sent();
    rig.card.present();
    rig.channel.reply_to("PLATE:", "PAY:250.00");

    let cycle = terminal.poll_once();
    assert!(matches!(cycle.payment, Some(PaymentOutcome::Paid { .. })));
    assert_eq!(
        rig.channel.sent(),
        vec!["PLATE:RA123ABC;BALANCE:1000.00", "DONE"]
    );
    let balance = decode_balance(&rig.card.block(BlockId::BALANCE)).unwrap();
    assert_eq!(balance.value(), 750.0);
}

#[test]
fn status_handshake() {
    let (mut terminal, rig) = mock_terminal(TerminalConfig::strict()).unwrap();
    rig.channel.push_line("STATUS");
    rig.channel.push_line("Status");

    let cycles = terminal.run_cycles(2);
    assert!(cycles.iter().all(|c| c.command == Some(CommandOutcome::Status)));
    assert_eq!(rig.channel.sent(), vec!["READY", "READY"]);
}

#[test]
fn unanswered_fare_times_out_and_terminal_keeps_running() {
    let (mut terminal, rig) = mock_terminal(TerminalConfig::strict()).unwrap();
    seed_record(&rig.card, "RA1", 100.0).unwrap();
    rig.card.present();

    let cycle = terminal.poll_once();
    assert_eq!(cycle.payment, Some(PaymentOutcome::Failed(Fault::Timeout)));
    assert_eq!(rig.channel.last_sent().as_deref(), Some("ERROR:TIMEOUT"));
    assert_eq!(rig.card.block(BlockId::BALANCE), block_from_hex(BALANCE_100_HEX));

    rig.channel.push_line("STATUS");
    assert_eq!(terminal.poll_once().command, Some(CommandOutcome::Status));
}

#[test]
fn every_card_path_ends_halted() {
    let (mut terminal, rig) = mock_terminal(TerminalConfig::strict()).unwrap();
    seed_record(&rig.card, "RA1", 100.0).unwrap();

    for fare in ["PAY:10", "PAY:1000", "PAY:abc"] {
        rig.card.clear_calls();
        rig.card.present();
        rig.channel.reply_to("PLATE:", fare);
        assert!(terminal.poll_once().payment.is_some());
        let calls = rig.card.calls();
        assert_eq!(
            &calls[calls.len() - 2..],
            &[StorageCall::StopCrypto, StorageCall::Halt],
            "{}",
            fare
        );
    }
}

#[test]
fn permissive_profile_speaks_prose() {
    let (mut terminal, rig) = mock_terminal(TerminalConfig::permissive()).unwrap();
    rig.card.present();
    rig.channel.push_line("register");
    rig.channel.reply_to("Enter plate", "ABC123");
    rig.channel.reply_to("Enter initial", "0");

    let cycle = terminal.poll_once();
    assert!(matches!(
        cycle.command,
        Some(CommandOutcome::Registration(RegistrationOutcome::Registered(_)))
    ));
    let sent = rig.channel.sent();
    assert_eq!(sent[0], "Enter plate number:");
    assert_eq!(sent[2], "Place the card on the reader...");
    assert_eq!(sent[3], "Card registered. Plate: ABC123, Balance: 0.00");
}
