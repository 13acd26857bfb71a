//! Conversion of engine results into the serializable `api_types` views.

use api_types::{
    balance::{BalanceView, EventBalanceView, ExpenseBalanceView, Status},
    settlement::{SettlementPlanView, SettlementView, SummaryView},
};
use engine::{
    Balance, BalanceStatus, DataIntegrityWarning, EventBalances, ExpenseBalance, ParticipantId,
    SettlementPlan, UserBalance,
};

fn status(status: BalanceStatus) -> Status {
    match status {
        BalanceStatus::Owed => Status::Owed,
        BalanceStatus::Owes => Status::Owes,
        BalanceStatus::Settled => Status::Settled,
    }
}

pub fn balance(participant_id: &ParticipantId, balance: &Balance) -> BalanceView {
    BalanceView {
        participant_id: participant_id.to_string(),
        owed: balance.owed.to_decimal(),
        paid: balance.paid.to_decimal(),
        net: balance.net.to_decimal(),
        status: status(balance.status()),
    }
}

pub fn user_balance(user: &UserBalance) -> BalanceView {
    balance(&user.participant_id, &user.balance)
}

pub fn expense_balance(expense: &ExpenseBalance) -> ExpenseBalanceView {
    ExpenseBalanceView {
        expense_id: expense.expense_id.to_string(),
        payer_id: expense.payer_id.to_string(),
        total_amount: expense.total_amount.to_decimal(),
        balances: expense
            .balances
            .iter()
            .map(|(participant, share)| (participant.to_string(), share.to_decimal()))
            .collect(),
    }
}

pub fn event_balance(
    event_id: &str,
    balances: &EventBalances,
    warnings: &[DataIntegrityWarning],
) -> EventBalanceView {
    EventBalanceView {
        event_id: event_id.to_string(),
        balances: balances
            .iter()
            .map(|(participant, b)| balance(participant, b))
            .collect(),
        warnings: warnings.iter().map(ToString::to_string).collect(),
    }
}

pub fn settlement_plan(plan: &SettlementPlan) -> SettlementPlanView {
    SettlementPlanView {
        settlements: plan
            .settlements
            .iter()
            .map(|s| SettlementView {
                from: s.from.to_string(),
                to: s.to.to_string(),
                amount: s.amount.to_decimal(),
            })
            .collect(),
        summary: SummaryView {
            total_debt: plan.summary.total_debt.to_decimal(),
            total_credit: plan.summary.total_credit.to_decimal(),
            balanced: plan.summary.balanced,
        },
        warnings: plan.warnings.iter().map(ToString::to_string).collect(),
    }
}
