//! Prints command output as plain text or pretty JSON.

use std::io::Write;

use api_types::{
    balance::{BalanceView, EventBalanceView, ExpenseBalanceView, Status},
    expense::SplitRecord,
    settlement::SettlementPlanView,
};

use crate::{
    commands::{CheckReport, Output},
    error::Result,
    settings::OutputFormat,
};

pub fn write(out: &mut impl Write, format: OutputFormat, output: &Output) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, output)?;
            writeln!(out)?;
        }
        OutputFormat::Text => text(out, output)?,
    }
    Ok(())
}

fn text(out: &mut impl Write, output: &Output) -> Result<()> {
    match output {
        Output::Expense(expense) => expense_text(out, expense),
        Output::Event(report) => {
            event_text(out, &report.balances)?;
            writeln!(out)?;
            plan_text(out, &report.settlement)
        }
        Output::User(balance) => {
            writeln!(out, "{:<12} {:>10} {:>10} {:>10}  status", "participant", "owed", "paid", "net")?;
            balance_line(out, balance)
        }
        Output::Settlement(plan) => plan_text(out, plan),
        Output::Check(report) => check_text(out, report),
        Output::Split(split) => split_text(out, split),
    }
}

fn balance_line(out: &mut impl Write, balance: &BalanceView) -> Result<()> {
    let status = match balance.status {
        Status::Owed => "owed",
        Status::Owes => "owes",
        Status::Settled => "settled",
    };
    writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10}  {status}",
        balance.participant_id, balance.owed, balance.paid, balance.net
    )?;
    Ok(())
}

fn expense_text(out: &mut impl Write, expense: &ExpenseBalanceView) -> Result<()> {
    writeln!(
        out,
        "expense {} paid by {}: {}",
        expense.expense_id, expense.payer_id, expense.total_amount
    )?;
    for (participant, share) in &expense.balances {
        writeln!(out, "  {participant:<12} {share:>10}")?;
    }
    Ok(())
}

fn event_text(out: &mut impl Write, event: &EventBalanceView) -> Result<()> {
    writeln!(out, "event {}", event.event_id)?;
    writeln!(out, "{:<12} {:>10} {:>10} {:>10}  status", "participant", "owed", "paid", "net")?;
    for balance in &event.balances {
        balance_line(out, balance)?;
    }
    for warning in &event.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    Ok(())
}

fn plan_text(out: &mut impl Write, plan: &SettlementPlanView) -> Result<()> {
    if plan.settlements.is_empty() {
        writeln!(out, "nothing to settle")?;
    }
    for settlement in &plan.settlements {
        writeln!(out, "{} -> {}: {}", settlement.from, settlement.to, settlement.amount)?;
    }
    writeln!(
        out,
        "total debt {}, total credit {}{}",
        plan.summary.total_debt,
        plan.summary.total_credit,
        if plan.summary.balanced { "" } else { " (unbalanced)" }
    )?;
    for warning in &plan.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    Ok(())
}

fn check_text(out: &mut impl Write, report: &CheckReport) -> Result<()> {
    for problem in &report.invalid_expenses {
        writeln!(out, "invalid expense {}: {}", problem.id, problem.error)?;
    }
    for warning in &report.warnings {
        writeln!(out, "warning: {warning}")?;
    }
    if report.is_clean() && report.warnings.is_empty() {
        writeln!(out, "ok")?;
    }
    Ok(())
}

fn split_text(out: &mut impl Write, split: &SplitRecord) -> Result<()> {
    writeln!(out, "{}", split.mode.as_str())?;
    for (participant, weight) in &split.weights {
        writeln!(out, "  {participant:<12} {weight}")?;
    }
    Ok(())
}
