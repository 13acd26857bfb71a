//! Wire and record types shared with the persistence collaborator and with
//! callers of the engine.
//!
//! Everything here is plain serde data in camelCase JSON. Amounts are
//! decimals (`80`, `33.5`, `"9.99"`); conversion into the engine's integer
//! cents and split enums happens once, at the boundary.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod user {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserRecord {
        pub id: String,
        #[serde(default)]
        pub name: String,
    }
}

pub mod event {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EventRecord {
        pub id: String,
        #[serde(default)]
        pub name: String,
        /// The universe of valid split members for the event's expenses.
        pub participant_ids: Vec<String>,
    }
}

pub mod expense {
    use super::*;

    /// Weight system of a split.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum SplitMode {
        Percentage,
        Shares,
    }

    impl SplitMode {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Percentage => "percentage",
                Self::Shares => "shares",
            }
        }
    }

    /// A split definition as stored: a mode and participant → weight pairs.
    ///
    /// `weights` keeps the order found in the JSON object.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SplitRecord {
        pub mode: SplitMode,
        pub weights: IndexMap<String, Decimal>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseRecord {
        pub id: String,
        pub event_id: String,
        pub amount: Decimal,
        pub payer_id: String,
        pub date: DateTime<Utc>,
        pub split: SplitRecord,
    }
}

pub mod payment {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PaymentRecord {
        pub id: String,
        pub participant_id: String,
        pub amount: Decimal,
        pub date: DateTime<Utc>,
        #[serde(default)]
        pub event_id: Option<String>,
    }
}

pub mod snapshot {
    use super::*;

    use crate::{
        event::EventRecord, expense::ExpenseRecord, payment::PaymentRecord, user::UserRecord,
    };

    /// A consistent dump of every record, read at once.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct Snapshot {
        pub users: Vec<UserRecord>,
        pub events: Vec<EventRecord>,
        pub expenses: Vec<ExpenseRecord>,
        pub payments: Vec<PaymentRecord>,
    }
}

pub mod balance {
    use super::*;

    /// Where a participant stands.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Status {
        Owed,
        Owes,
        Settled,
    }

    /// Owed/paid/net of one participant, amounts with two decimals.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BalanceView {
        pub participant_id: String,
        pub owed: Decimal,
        pub paid: Decimal,
        pub net: Decimal,
        pub status: Status,
    }

    /// Shares of one expense.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseBalanceView {
        pub expense_id: String,
        pub payer_id: String,
        pub total_amount: Decimal,
        pub balances: IndexMap<String, Decimal>,
    }

    /// Balances of one event, plus the data problems found while computing
    /// them.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EventBalanceView {
        pub event_id: String,
        pub balances: Vec<BalanceView>,
        pub warnings: Vec<String>,
    }
}

pub mod settlement {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SettlementView {
        pub from: String,
        pub to: String,
        pub amount: Decimal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SummaryView {
        pub total_debt: Decimal,
        pub total_credit: Decimal,
        pub balanced: bool,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SettlementPlanView {
        pub settlements: Vec<SettlementView>,
        pub summary: SummaryView,
        pub warnings: Vec<String>,
    }
}
