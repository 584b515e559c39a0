// farecard/src/workflow/registration.rs

//! Writes a plate identifier and an initial balance onto a blank or
//! reused card.

use log::{debug, info, warn};

use crate::protocol::codec::{encode_balance, encode_identifier};
use crate::protocol::command::parse_decimal;
use crate::protocol::{Fault, Prompt, Reply};
use crate::storage::{CardSession, CardStorage};
use crate::types::{Balance, BlockData, BlockId, CardIdentifier, CardRecord};
use crate::workflow::{step, Operator, RegistrationOutcome};

/// Run one registration and report its outcome.
///
/// Input is validated before the card is asked for, so a bad identifier or
/// balance never reaches the card.
pub fn register(storage: &mut dyn CardStorage, operator: &mut Operator<'_>) -> RegistrationOutcome {
    let outcome = match run(storage, operator) {
        Ok(record) => {
            info!(
                "registered {} with balance {}",
                record.identifier, record.balance
            );
            RegistrationOutcome::Registered(record)
        }
        Err(fault) => {
            warn!("registration failed: {}", fault);
            RegistrationOutcome::Failed(fault)
        }
    };
    operator.say(&outcome.reply());
    outcome
}

fn run(
    storage: &mut dyn CardStorage,
    operator: &mut Operator<'_>,
) -> Result<CardRecord, Fault> {
    let config = operator.config();

    operator.say(&Reply::Prompt(Prompt::Identifier));
    let line = step(
        operator.await_line(config.registration_timeout),
        Fault::Timeout,
    )?;
    let identifier = step(
        CardIdentifier::parse(line.trim(), &config.identifier_policy),
        Fault::InvalidPlate,
    )?;
    debug!("registration: identifier {}", identifier);

    operator.say(&Reply::Prompt(Prompt::Balance));
    let line = step(
        operator.await_line(config.registration_timeout),
        Fault::Timeout,
    )?;
    let value = step(parse_decimal(&line), Fault::InvalidBalance)?;
    if !config.initial_balance.admits(value) {
        warn!(
            "initial balance {} rejected by {:?} policy",
            value, config.initial_balance
        );
        return Err(Fault::InvalidBalance);
    }
    let balance = step(Balance::new(value), Fault::InvalidBalance)?;
    debug!("registration: balance {}", balance);

    operator.say(&Reply::Prompt(Prompt::PresentCard));
    step(operator.await_card(storage), Fault::Timeout)?;
    debug!("registration: card detected");

    let record = CardRecord::new(identifier, balance);
    let mut session = CardSession::open(storage, config.key);
    let written = write_record(&mut session, &record, config.rollback_partial_registration);
    session.close();
    written.map(|()| record)
}

fn write_record(
    session: &mut CardSession<'_>,
    record: &CardRecord,
    rollback: bool,
) -> Result<(), Fault> {
    step(session.authenticate(BlockId::PLATE), Fault::AuthPlate)?;
    let snapshot = if rollback {
        Some(step(session.read(BlockId::PLATE), Fault::ReadPlate)?)
    } else {
        None
    };
    step(
        session.write(BlockId::PLATE, &encode_identifier(&record.identifier)),
        Fault::WritePlate,
    )?;

    if let Err(fault) = write_balance(session, record.balance) {
        if let Some(previous) = snapshot {
            restore_plate(session, &previous);
        }
        return Err(fault);
    }
    Ok(())
}

fn write_balance(session: &mut CardSession<'_>, balance: Balance) -> Result<(), Fault> {
    let block = BlockId::BALANCE;
    step(session.authenticate(block), Fault::AuthBalance)?;
    step(
        session.write(block, &encode_balance(balance)),
        Fault::WriteBalance,
    )
}

/// One compensating write of the plate block as it was before registration.
fn restore_plate(session: &mut CardSession<'_>, previous: &BlockData) {
    let restored = session
        .authenticate(BlockId::PLATE)
        .and_then(|()| session.write(BlockId::PLATE, previous));
    match restored {
        Ok(()) => info!("plate block restored after failed balance write"),
        Err(e) => warn!("could not restore plate block: {}", e),
    }
}
