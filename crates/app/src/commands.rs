use api_types::{
    balance::{BalanceView, EventBalanceView, ExpenseBalanceView},
    expense::SplitRecord,
    settlement::SettlementPlanView,
};
use engine::{Engine, NetBalance, net_balances};
use serde::Serialize;

use crate::{
    error::Result,
    settings::Command,
    snapshot::{Ledger, split_to_record},
    views,
};

/// Balances of one event together with the transfers settling it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    #[serde(flatten)]
    pub balances: EventBalanceView,
    pub settlement: SettlementPlanView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordProblem {
    pub id: String,
    pub error: String,
}

/// Result of `check`: broken expenses and data warnings per event.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub invalid_expenses: Vec<RecordProblem>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Warnings alone do not make a snapshot unusable.
    pub fn is_clean(&self) -> bool {
        self.invalid_expenses.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Output {
    Expense(ExpenseBalanceView),
    Event(EventReport),
    User(BalanceView),
    Settlement(SettlementPlanView),
    Check(CheckReport),
    Split(SplitRecord),
}

impl Output {
    /// Whether the process should exit successfully after printing this.
    pub fn is_success(&self) -> bool {
        match self {
            Self::Check(report) => report.is_clean(),
            _ => true,
        }
    }
}

/// Runs `command` against `ledger`.
pub fn run(engine: &Engine, ledger: &Ledger, command: &Command) -> Result<Output> {
    tracing::debug!(?command, "running command");
    if !matches!(command, Command::Check | Command::EqualSplit { .. }) {
        // Balances are only computed when every expense holds its invariants.
        ledger.ensure_valid_expenses()?;
    }
    match command {
        Command::Expense { id } => {
            let expense = ledger.expense(id)?;
            let shares = engine.calculate_expense_balances(expense)?;
            Ok(Output::Expense(views::expense_balance(&shares)))
        }
        Command::Event { id } => event(engine, ledger, id).map(Output::Event),
        Command::User { id } => {
            let participant = ledger.participant(id)?;
            let balance =
                engine.user_balance_from_ledger(participant, &ledger.expenses, &ledger.payments)?;
            Ok(Output::User(views::user_balance(&balance)))
        }
        Command::Settle { event: Some(id) } => {
            event(engine, ledger, id).map(|report| Output::Settlement(report.settlement))
        }
        Command::Settle { event: None } => {
            let balances =
                engine.group_balances(&ledger.participants, &ledger.expenses, &ledger.payments)?;
            let nets: Vec<NetBalance> = balances.iter().map(NetBalance::from).collect();
            let plan = engine.plan_settlements(&nets);
            Ok(Output::Settlement(views::settlement_plan(&plan)))
        }
        Command::Check => Ok(Output::Check(check(engine, ledger))),
        Command::EqualSplit { participants } => {
            let split = engine.create_equal_split(participants.iter().map(String::as_str))?;
            Ok(Output::Split(split_to_record(&split)))
        }
    }
}

fn event(engine: &Engine, ledger: &Ledger, id: &str) -> Result<EventReport> {
    let event = ledger.event(id)?;
    let warnings = engine.event_integrity_warnings(event, &ledger.expenses);
    let balances = engine.calculate_event_balance(
        id,
        &ledger.expenses,
        &ledger.payments,
        &event.participant_ids,
    )?;
    let plan = engine.plan_settlements(&net_balances(&balances));

    Ok(EventReport {
        balances: views::event_balance(id, &balances, &warnings),
        settlement: views::settlement_plan(&plan),
    })
}

fn check(engine: &Engine, ledger: &Ledger) -> CheckReport {
    let mut report = CheckReport::default();
    for expense in &ledger.expenses {
        if let Err(err) = expense.validate() {
            tracing::warn!(expense = %expense.id, "{err}");
            report.invalid_expenses.push(RecordProblem {
                id: expense.id.to_string(),
                error: err.to_string(),
            });
        }
    }
    for event in &ledger.events {
        report.warnings.extend(
            engine
                .event_integrity_warnings(event, &ledger.expenses)
                .iter()
                .map(ToString::to_string),
        );
    }
    tracing::info!(
        expenses = ledger.expenses.len(),
        invalid = report.invalid_expenses.len(),
        warnings = report.warnings.len(),
        "snapshot checked"
    );
    report
}
