//! Plain records handed to the engine by the persistence collaborator.
//!
//! The engine does not fetch, store or mutate these records. It only reads
//! snapshots of them for the duration of one calculation call.

use chrono::{DateTime, Utc};

use crate::{
    EngineError, EventId, ExpenseId, Money, ParticipantId, PaymentId, ResultEngine,
    SplitDefinition,
};

/// A shared expense: one payer, one amount, one split.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub event_id: EventId,
    /// Always > 0 for a valid expense.
    pub amount: Money,
    pub payer_id: ParticipantId,
    pub date: DateTime<Utc>,
    pub split: SplitDefinition,
}

impl Expense {
    /// Builds a validated expense.
    ///
    /// Fails with [`EngineError::ExpenseInvalid`] for a non-positive amount and
    /// with [`EngineError::SplitInvalid`] for an invalid split or a payer
    /// missing from the split.
    pub fn new(
        id: impl Into<ExpenseId>,
        event_id: impl Into<EventId>,
        amount: Money,
        payer_id: impl Into<ParticipantId>,
        date: DateTime<Utc>,
        split: SplitDefinition,
    ) -> ResultEngine<Self> {
        let expense = Self {
            id: id.into(),
            event_id: event_id.into(),
            amount,
            payer_id: payer_id.into(),
            date,
            split,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Checks the expense invariants without building a new value.
    pub fn validate(&self) -> ResultEngine<()> {
        self.ensure_calculable()?;
        self.split.validate_for_payer(&self.payer_id)
    }

    /// Minimal checks a calculator needs before allocating the expense.
    pub(crate) fn ensure_calculable(&self) -> ResultEngine<()> {
        if !self.amount.is_positive() {
            return Err(EngineError::ExpenseInvalid(format!(
                "expense '{}' amount must be > 0, got {}",
                self.id, self.amount
            )));
        }
        if self.split.is_empty() {
            return Err(EngineError::ExpenseInvalid(format!(
                "expense '{}' has no split definition",
                self.id
            )));
        }
        Ok(())
    }
}

/// A direct payment: a general credit for one participant (settlement,
/// advance), optionally tied to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payment {
    pub id: PaymentId,
    pub participant_id: ParticipantId,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub event_id: Option<EventId>,
}

impl Payment {
    pub fn new(
        id: impl Into<PaymentId>,
        participant_id: impl Into<ParticipantId>,
        amount: Money,
        date: DateTime<Utc>,
        event_id: Option<EventId>,
    ) -> Self {
        Self {
            id: id.into(),
            participant_id: participant_id.into(),
            amount,
            date,
            event_id,
        }
    }
}

/// An event: the universe of valid split members for its expenses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub participant_ids: Vec<ParticipantId>,
}

impl Event {
    pub fn new<I, P>(id: impl Into<EventId>, name: impl Into<String>, participants: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ParticipantId>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            participant_ids: participants.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn has_participant(&self, participant: &str) -> bool {
        self.participant_ids.iter().any(|p| p.as_str() == participant)
    }
}
