use crate::{
    Balance, Expense, Money, ParticipantId, Payment, ResultEngine, UserBalance,
};

use super::Engine;

impl Engine {
    /// Folds one participant's involvement across all events into a single
    /// balance and status.
    ///
    /// - `owed`: the participant's own share of every expense of
    ///   `as_participant` where its weight is non-zero.
    /// - `paid`: the amount of every expense of `as_payer` plus every payment
    ///   of `payments`.
    ///
    /// The three lists are taken as given (the caller already selected them);
    /// use [`user_balance_from_ledger`](Self::user_balance_from_ledger) to
    /// select them from a full ledger.
    pub fn calculate_user_balance(
        &self,
        participant_id: &ParticipantId,
        as_participant: &[Expense],
        as_payer: &[Expense],
        payments: &[Payment],
    ) -> ResultEngine<UserBalance> {
        let mut owed = Money::ZERO;
        for expense in as_participant {
            if !expense.split.is_charged(participant_id.as_str()) {
                continue;
            }
            let shares = self.calculate_expense_balances(expense)?;
            if let Some(share) = shares.balances.get(participant_id.as_str()) {
                owed = owed.try_add(*share)?;
            }
        }

        let paid = Money::try_sum(
            as_payer
                .iter()
                .map(|e| e.amount)
                .chain(payments.iter().map(|p| p.amount)),
        )?;

        let balance = Balance::new(owed, paid)?;
        tracing::debug!(
            participant = %participant_id,
            owed = %balance.owed,
            paid = %balance.paid,
            net = %balance.net,
            "user balance computed"
        );
        Ok(UserBalance::new(participant_id.clone(), balance))
    }

    /// Same as [`calculate_user_balance`](Self::calculate_user_balance), but
    /// selects the participant's expenses and payments from a full ledger.
    pub fn user_balance_from_ledger(
        &self,
        participant_id: &ParticipantId,
        expenses: &[Expense],
        payments: &[Payment],
    ) -> ResultEngine<UserBalance> {
        let as_participant: Vec<Expense> = expenses
            .iter()
            .filter(|e| e.split.contains(participant_id.as_str()))
            .cloned()
            .collect();
        let as_payer: Vec<Expense> = expenses
            .iter()
            .filter(|e| e.payer_id == *participant_id)
            .cloned()
            .collect();
        let own_payments: Vec<Payment> = payments
            .iter()
            .filter(|p| p.participant_id == *participant_id)
            .cloned()
            .collect();

        self.calculate_user_balance(participant_id, &as_participant, &as_payer, &own_payments)
    }

    /// Cross-event balances of a whole group, in the given order.
    ///
    /// Feed the result to [`plan_settlements`](Self::plan_settlements) to
    /// settle the group across all events.
    pub fn group_balances(
        &self,
        participants: &[ParticipantId],
        expenses: &[Expense],
        payments: &[Payment],
    ) -> ResultEngine<Vec<UserBalance>> {
        participants
            .iter()
            .map(|participant| self.user_balance_from_ledger(participant, expenses, payments))
            .collect()
    }
}
