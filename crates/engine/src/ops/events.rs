use crate::{
    Balance, DataIntegrityWarning, Event, EventBalances, Expense, ParticipantId, Payment,
    ResultEngine,
};

use super::Engine;

impl Engine {
    /// Folds every expense and direct payment of one event into
    /// per-participant `{owed, paid, net}` balances.
    ///
    /// - Every declared participant appears in the result, in declaration
    ///   order, even without activity.
    /// - Only expenses of `event_id` and payments tied to `event_id` count.
    /// - Each split participant's share is added to its `owed`; the full
    ///   amount is added to the payer's `paid`; payments add to `paid`.
    ///
    /// Inputs are trusted: split participants missing from `participant_ids`
    /// are appended to the result instead of being rejected. Use
    /// [`event_integrity_warnings`](Self::event_integrity_warnings) to report
    /// them.
    pub fn calculate_event_balance(
        &self,
        event_id: &str,
        expenses: &[Expense],
        payments: &[Payment],
        participant_ids: &[ParticipantId],
    ) -> ResultEngine<EventBalances> {
        let mut balances: EventBalances = participant_ids
            .iter()
            .map(|participant| (participant.clone(), Balance::default()))
            .collect();

        let event_expenses = expenses.iter().filter(|e| e.event_id.as_str() == event_id);
        for expense in event_expenses {
            let shares = self.calculate_expense_balances(expense)?;
            for (participant, owed) in shares.balances {
                balances.entry(participant).or_default().add_owed(owed)?;
            }
            balances
                .entry(expense.payer_id.clone())
                .or_default()
                .add_paid(expense.amount)?;
        }

        let event_payments = payments
            .iter()
            .filter(|p| p.event_id.as_ref().is_some_and(|id| id.as_str() == event_id));
        for payment in event_payments {
            balances
                .entry(payment.participant_id.clone())
                .or_default()
                .add_paid(payment.amount)?;
        }

        tracing::debug!(event = event_id, participants = balances.len(), "event balance computed");
        Ok(balances)
    }

    /// Lists the expenses of `event` whose payer or split members are not
    /// event participants, and those whose payer is missing from their own
    /// split.
    ///
    /// These are upstream data problems: they never abort a calculation.
    pub fn event_integrity_warnings(
        &self,
        event: &Event,
        expenses: &[Expense],
    ) -> Vec<DataIntegrityWarning> {
        let mut warnings = Vec::new();
        for expense in expenses.iter().filter(|e| e.event_id == event.id) {
            if !event.has_participant(expense.payer_id.as_str()) {
                warnings.push(DataIntegrityWarning::UnknownPayer {
                    event_id: event.id.clone(),
                    expense_id: expense.id.clone(),
                    payer_id: expense.payer_id.clone(),
                });
            }
            if !expense.split.contains(expense.payer_id.as_str()) {
                warnings.push(DataIntegrityWarning::PayerNotInSplit {
                    event_id: event.id.clone(),
                    expense_id: expense.id.clone(),
                    payer_id: expense.payer_id.clone(),
                });
            }
            for participant in expense.split.weights().keys() {
                if !event.has_participant(participant.as_str()) {
                    warnings.push(DataIntegrityWarning::UnknownSplitParticipant {
                        event_id: event.id.clone(),
                        expense_id: expense.id.clone(),
                        participant_id: participant.clone(),
                    });
                }
            }
        }

        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        warnings
    }
}
