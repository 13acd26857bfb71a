//! Balance & settlement calculation engine.
//!
//! The engine splits shared expenses among participants and tracks who owes
//! whom. It is made of pure layers, leaves first:
//!
//! - the money allocator ([`allocate`]) turns a total and a
//!   [`SplitDefinition`] into owed amounts summing exactly to the total;
//! - [`Engine::calculate_expense_balances`] applies it to one [`Expense`];
//! - [`Engine::calculate_event_balance`] folds the expenses and payments of
//!   one event into per-participant [`Balance`]s;
//! - [`Engine::calculate_user_balance`] does the same for one participant
//!   across all events;
//! - [`Engine::plan_settlements`] proposes transfers that zero every balance.
//!
//! Every amount is a [`Money`] value in integer cents. The engine performs no
//! I/O and keeps no state between calls.

pub use allocation::{
    Allocation, EQUAL_WEIGHT_TOLERANCE, RemainderPolicy, allocate, allocate_with_policy,
};
pub use balances::{
    Balance, BalanceStatus, EventBalances, ExpenseBalance, NetBalance, UserBalance, net_balances,
};
pub use error::EngineError;
pub use ids::{EventId, ExpenseId, ParticipantId, PaymentId};
pub use money::{Money, TOLERANCE};
pub use ops::{Engine, EngineBuilder};
pub use records::{Event, Expense, Payment};
pub use settlement::{Settlement, SettlementPlan, SettlementSummary};
pub use split::{SPLIT_SUM_TOLERANCE, SplitDefinition, Weights, create_equal_split};
pub use warnings::DataIntegrityWarning;

mod allocation;
mod balances;
mod error;
mod ids;
mod money;
mod ops;
mod records;
mod settlement;
mod split;
mod warnings;

type ResultEngine<T> = Result<T, EngineError>;
