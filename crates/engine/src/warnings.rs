//! Non-fatal data problems.
//!
//! A [`DataIntegrityWarning`] reports an upstream data problem the engine
//! cannot and should not repair. Calculations still return a best-effort
//! result; the warning travels next to it and is logged by whoever surfaces
//! it.

use thiserror::Error;

use crate::{EventId, ExpenseId, Money, ParticipantId};

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum DataIntegrityWarning {
    /// An expense split names someone who is not a participant of the event.
    #[error(
        "expense '{expense_id}' of event '{event_id}' splits with '{participant_id}', who is not an event participant"
    )]
    UnknownSplitParticipant {
        event_id: EventId,
        expense_id: ExpenseId,
        participant_id: ParticipantId,
    },
    /// An expense payer is not a participant of the event.
    #[error("expense '{expense_id}' of event '{event_id}' is paid by '{payer_id}', who is not an event participant")]
    UnknownPayer {
        event_id: EventId,
        expense_id: ExpenseId,
        payer_id: ParticipantId,
    },
    /// An expense payer is not part of the expense split.
    #[error("expense '{expense_id}' of event '{event_id}' is paid by '{payer_id}', who is not in its split")]
    PayerNotInSplit {
        event_id: EventId,
        expense_id: ExpenseId,
        payer_id: ParticipantId,
    },
    /// Debts and credits do not match: money was created or destroyed
    /// upstream.
    #[error("settlement is unbalanced: total debt {total_debt}, total credit {total_credit}")]
    UnbalancedSettlement { total_debt: Money, total_credit: Money },
}
