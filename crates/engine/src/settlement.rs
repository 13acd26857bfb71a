//! Settlement suggestions.
//!
//! A [`Settlement`] is a proposed transfer, never a persisted entity. See
//! [`Engine::plan_settlements`](crate::Engine::plan_settlements) for how plans
//! are built.

use crate::{DataIntegrityWarning, Money, ParticipantId};

/// A suggested transfer from a net debtor to a net creditor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

impl Settlement {
    pub fn new(from: impl Into<ParticipantId>, to: impl Into<ParticipantId>, amount: Money) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Totals of a settlement plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettlementSummary {
    /// Sum of `|net|` over every debtor.
    pub total_debt: Money,
    /// Sum of `net` over every creditor.
    pub total_credit: Money,
    /// `|total_debt - total_credit| < 0.01`.
    pub balanced: bool,
}

/// Ordered transfers that settle a group, plus their summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    pub settlements: Vec<Settlement>,
    pub summary: SettlementSummary,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl SettlementPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settlements.is_empty()
    }

    /// Total money moved by the plan.
    #[must_use]
    pub fn transferred(&self) -> Money {
        self.settlements.iter().map(|s| s.amount).sum()
    }
}
