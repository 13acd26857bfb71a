//! Derived balance values.
//!
//! Balances are never persisted nor mutated incrementally: they only exist as
//! the return value of a calculation and are recomputed from expenses and
//! payments on demand.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Allocation, ExpenseId, Money, ParticipantId, ResultEngine};

/// Owed/paid totals of one participant over some scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Balance {
    pub owed: Money,
    pub paid: Money,
    /// Always `paid - owed`.
    pub net: Money,
}

impl Balance {
    /// Builds a balance from its totals, failing when `paid - owed`
    /// overflows.
    pub fn new(owed: Money, paid: Money) -> ResultEngine<Self> {
        Ok(Self {
            owed,
            paid,
            net: paid.try_sub(owed)?,
        })
    }

    pub(crate) fn add_owed(&mut self, amount: Money) -> ResultEngine<()> {
        *self = Self::new(self.owed.try_add(amount)?, self.paid)?;
        Ok(())
    }

    pub(crate) fn add_paid(&mut self, amount: Money) -> ResultEngine<()> {
        *self = Self::new(self.owed, self.paid.try_add(amount)?)?;
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::of(self.net)
    }
}

/// Where a participant stands, with a ±0.01 tolerance band around zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStatus {
    /// The group owes money to this participant (`net > 0.01`).
    Owed,
    /// This participant owes money to the group (`net < -0.01`).
    Owes,
    Settled,
}

impl BalanceStatus {
    /// Classifies a net balance.
    ///
    /// ```rust
    /// use engine::{BalanceStatus, Money};
    ///
    /// assert_eq!(BalanceStatus::of(Money::new(2)), BalanceStatus::Owed);
    /// assert_eq!(BalanceStatus::of(Money::new(1)), BalanceStatus::Settled);
    /// assert_eq!(BalanceStatus::of(Money::new(-2)), BalanceStatus::Owes);
    /// ```
    #[must_use]
    pub fn of(net: Money) -> Self {
        if net.is_negligible() {
            Self::Settled
        } else if net.is_positive() {
            Self::Owed
        } else {
            Self::Owes
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owed => "owed",
            Self::Owes => "owes",
            Self::Settled => "settled",
        }
    }
}

/// Cross-event balance of one participant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserBalance {
    pub participant_id: ParticipantId,
    pub balance: Balance,
    pub status: BalanceStatus,
}

impl UserBalance {
    pub fn new(participant_id: ParticipantId, balance: Balance) -> Self {
        Self {
            participant_id,
            status: balance.status(),
            balance,
        }
    }
}

/// Per-participant shares of a single expense.
///
/// `balances` holds each participant's share of the expense, independent of
/// who paid it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseBalance {
    pub expense_id: ExpenseId,
    pub payer_id: ParticipantId,
    pub total_amount: Money,
    pub balances: Allocation,
}

/// Per-participant balances of one event, in participant-list order.
pub type EventBalances = IndexMap<ParticipantId, Balance>;

/// A participant's net figure, the planner input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetBalance {
    pub participant_id: ParticipantId,
    pub net: Money,
}

impl NetBalance {
    pub fn new(participant_id: impl Into<ParticipantId>, net: Money) -> Self {
        Self {
            participant_id: participant_id.into(),
            net,
        }
    }
}

impl From<&UserBalance> for NetBalance {
    fn from(value: &UserBalance) -> Self {
        Self {
            participant_id: value.participant_id.clone(),
            net: value.balance.net,
        }
    }
}

/// Collects the planner input from an event's balances.
pub fn net_balances(balances: &EventBalances) -> Vec<NetBalance> {
    balances
        .iter()
        .map(|(participant, balance)| NetBalance::new(participant.clone(), balance.net))
        .collect()
}
