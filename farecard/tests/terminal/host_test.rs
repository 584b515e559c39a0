use std::time::Duration;

use farecard::config::{IdentifierPolicy, TerminalConfig};
use farecard::protocol::host::{fare_command, hourly_fare, TerminalReply};
use farecard::test_support::{mock_terminal, seed_record};

#[test]
fn host_reads_report_and_terminal_confirms() {
    let (mut terminal, rig) = mock_terminal(TerminalConfig::strict()).unwrap();
    seed_record(&rig.card, "RA123ABC", 1000.0).unwrap();
    rig.card.present();

    // parked for 2h30m at 200 per hour
    let fare = hourly_fare(Duration::from_secs(2 * 3600 + 30 * 60), 200.0).unwrap();
    let command = fare_command(fare);
    assert_eq!(command, "PAY:400.00");
    rig.channel.reply_to("PLATE:", &command);

    terminal.poll_once();

    let policy = IdentifierPolicy::strict();
    let replies: Vec<TerminalReply> = rig
        .channel
        .sent()
        .iter()
        .map(|line| TerminalReply::parse(line, &policy))
        .collect();
    match &replies[..] {
        [TerminalReply::Report(report), TerminalReply::Done] => {
            assert_eq!(report.identifier.as_str(), "RA123ABC");
            assert_eq!(report.balance.value(), 1000.0);
        }
        other => panic!("unexpected conversation: {:?}", other),
    }
}

#[test]
fn host_sees_insufficient_funds() {
    let (mut terminal, rig) = mock_terminal(TerminalConfig::strict()).unwrap();
    seed_record(&rig.card, "RA9", 150.0).unwrap();
    rig.card.present();
    let fare = hourly_fare(Duration::from_secs(30), 200.0).unwrap();
    rig.channel.reply_to("PLATE:", &fare_command(fare));

    terminal.poll_once();

    let last = rig.channel.last_sent().unwrap();
    assert_eq!(
        TerminalReply::parse(&last, &IdentifierPolicy::strict()),
        TerminalReply::Insufficient
    );
}
