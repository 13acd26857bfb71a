//! Read-only JSON snapshot store.
//!
//! The snapshot is a consistent dump of every record. It is read once and
//! converted into engine types here, so the split mode string and decimal
//! amounts are resolved at the boundary and nowhere else.

use std::{fs, path::Path};

use api_types::{
    event::EventRecord,
    expense::{ExpenseRecord, SplitMode, SplitRecord},
    payment::PaymentRecord,
    snapshot::Snapshot,
};
use engine::{
    Event, Expense, Money, ParticipantId, Payment, SplitDefinition, Weights,
};

use crate::error::{AppError, Result};

/// Every record of a snapshot, as engine values.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub participants: Vec<ParticipantId>,
    pub events: Vec<Event>,
    pub expenses: Vec<Expense>,
    pub payments: Vec<Payment>,
}

/// Reads and parses the snapshot at `path`.
pub fn read(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&raw)?;
    tracing::debug!(
        path = %path.display(),
        users = snapshot.users.len(),
        events = snapshot.events.len(),
        expenses = snapshot.expenses.len(),
        payments = snapshot.payments.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

impl Ledger {
    /// Converts a snapshot into engine values.
    ///
    /// Amounts with sub-cent precision are rejected here. Split invariants
    /// are *not* checked: see [`Ledger::ensure_valid_expenses`].
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let events: Vec<Event> = snapshot.events.into_iter().map(event_from_record).collect();

        let mut participants: Vec<ParticipantId> = snapshot
            .users
            .into_iter()
            .map(|user| ParticipantId::from(user.id))
            .collect();
        if participants.is_empty() {
            for event in &events {
                for participant in &event.participant_ids {
                    if !participants.contains(participant) {
                        participants.push(participant.clone());
                    }
                }
            }
        }

        let expenses = snapshot
            .expenses
            .into_iter()
            .map(expense_from_record)
            .collect::<Result<Vec<_>>>()?;
        let payments = snapshot
            .payments
            .into_iter()
            .map(payment_from_record)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            participants,
            events,
            expenses,
            payments,
        })
    }

    /// Fails on the first expense breaking an expense or split invariant.
    pub fn ensure_valid_expenses(&self) -> Result<()> {
        for expense in &self.expenses {
            expense.validate().map_err(|source| AppError::Record {
                id: expense.id.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn event(&self, id: &str) -> Result<&Event> {
        self.events
            .iter()
            .find(|event| event.id.as_str() == id)
            .ok_or_else(|| AppError::NotFound {
                kind: "event",
                id: id.to_string(),
            })
    }

    pub fn expense(&self, id: &str) -> Result<&Expense> {
        self.expenses
            .iter()
            .find(|expense| expense.id.as_str() == id)
            .ok_or_else(|| AppError::NotFound {
                kind: "expense",
                id: id.to_string(),
            })
    }

    pub fn participant(&self, id: &str) -> Result<&ParticipantId> {
        self.participants
            .iter()
            .find(|participant| participant.as_str() == id)
            .ok_or_else(|| AppError::NotFound {
                kind: "user",
                id: id.to_string(),
            })
    }
}

fn event_from_record(record: EventRecord) -> Event {
    Event::new(record.id, record.name, record.participant_ids)
}

/// Resolves the mode string once: the rest of the program only sees the enum.
pub fn split_from_record(record: SplitRecord) -> SplitDefinition {
    let weights: Weights = record
        .weights
        .into_iter()
        .map(|(participant, weight)| (ParticipantId::from(participant), weight))
        .collect();
    match record.mode {
        SplitMode::Percentage => SplitDefinition::Percentage(weights),
        SplitMode::Shares => SplitDefinition::Shares(weights),
    }
}

/// Inverse of [`split_from_record`], used to print split definitions.
pub fn split_to_record(split: &SplitDefinition) -> SplitRecord {
    let mode = match split {
        SplitDefinition::Percentage(_) => SplitMode::Percentage,
        SplitDefinition::Shares(_) => SplitMode::Shares,
    };
    SplitRecord {
        mode,
        weights: split
            .weights()
            .iter()
            .map(|(participant, weight)| (participant.to_string(), *weight))
            .collect(),
    }
}

fn expense_from_record(record: ExpenseRecord) -> Result<Expense> {
    let amount = Money::try_from_decimal(record.amount).map_err(|source| AppError::Record {
        id: record.id.clone(),
        source,
    })?;
    Ok(Expense {
        id: record.id.into(),
        event_id: record.event_id.into(),
        amount,
        payer_id: record.payer_id.into(),
        date: record.date,
        split: split_from_record(record.split),
    })
}

fn payment_from_record(record: PaymentRecord) -> Result<Payment> {
    let amount = Money::try_from_decimal(record.amount).map_err(|source| AppError::Record {
        id: record.id.clone(),
        source,
    })?;
    Ok(Payment::new(
        record.id,
        record.participant_id,
        amount,
        record.date,
        record.event_id.map(Into::into),
    ))
}
