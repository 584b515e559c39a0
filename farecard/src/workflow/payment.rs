// farecard/src/workflow/payment.rs

//! Reads a presented card, reports it to the host and debits the fare the
//! host answers with.

use log::{debug, info, warn};

use crate::protocol::codec::{decode_balance, decode_identifier, encode_balance};
use crate::protocol::command::parse_fare;
use crate::protocol::{Fault, Reply};
use crate::storage::{CardSession, CardStorage};
use crate::types::BlockId;
use crate::workflow::{step, Operator, PaymentOutcome};

/// Handle one freshly detected card.
///
/// The card is halted before the outcome line goes out, on every path.
pub fn collect_fare(storage: &mut dyn CardStorage, operator: &mut Operator<'_>) -> PaymentOutcome {
    let mut session = CardSession::open(storage, operator.config().key);
    let outcome = match transact(&mut session, operator) {
        Ok(outcome) => outcome,
        Err(fault) => PaymentOutcome::Failed(fault),
    };
    session.close();

    match &outcome {
        PaymentOutcome::Paid {
            identifier,
            remaining,
            fare,
            ..
        } => info!("{} paid {}, {} left", identifier, fare, remaining),
        PaymentOutcome::Declined {
            identifier,
            balance,
            fare,
        } => info!("{} declined: fare {} over balance {}", identifier, fare, balance),
        PaymentOutcome::Failed(fault) => warn!("payment failed: {}", fault),
    }
    operator.say(&outcome.reply());
    outcome
}

fn transact(
    session: &mut CardSession<'_>,
    operator: &mut Operator<'_>,
) -> Result<PaymentOutcome, Fault> {
    let config = operator.config();

    step(session.authenticate(BlockId::PLATE), Fault::AuthPlate)?;
    let block = step(session.read(BlockId::PLATE), Fault::ReadPlate)?;
    let identifier = step(
        decode_identifier(&block, &config.identifier_policy),
        Fault::InvalidPlate,
    )?;

    step(session.authenticate(BlockId::BALANCE), Fault::AuthBalance)?;
    let block = step(session.read(BlockId::BALANCE), Fault::ReadBalance)?;
    let balance = step(decode_balance(&block), Fault::InvalidBalance)?;
    debug!("payment: card {} holds {}", identifier, balance);

    operator.say(&Reply::CardReport {
        identifier: identifier.clone(),
        balance,
    });

    let line = step(operator.await_line(Some(config.fare_timeout)), Fault::Timeout)?;
    let fare = step(parse_fare(&line), Fault::InvalidAmount)?;
    debug!("payment: fare {}", fare);

    let Some(remaining) = balance.debit(fare) else {
        return Ok(PaymentOutcome::Declined {
            identifier,
            balance,
            fare,
        });
    };

    step(session.authenticate(BlockId::BALANCE), Fault::AuthWrite)?;
    step(
        session.write(BlockId::BALANCE, &encode_balance(remaining)),
        Fault::WriteFailed,
    )?;

    Ok(PaymentOutcome::Paid {
        identifier,
        previous: balance,
        remaining,
        fare,
    })
}
