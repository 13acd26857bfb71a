use crate::{
    DataIntegrityWarning, Money, NetBalance, ParticipantId, Settlement, SettlementPlan,
    SettlementSummary,
};

use super::Engine;

impl Engine {
    /// Suggests transfers that bring every net balance back to zero.
    ///
    /// Participants with `net < -0.01` are debtors, `net > 0.01` creditors;
    /// everybody else is already settled and ignored.
    ///
    /// The planner is a greedy two-pointer walk over the input order: the
    /// current debtor pays the current creditor `min(|debt|, credit)`, and
    /// whichever side drops inside the ±0.01 band is left behind. It stops when
    /// either side is exhausted.
    ///
    /// This is a deterministic, easy to audit heuristic. It is **not** a
    /// minimum-transaction solver: some groups can be settled with fewer
    /// transfers than it proposes.
    ///
    /// A plan whose total debt and total credit differ is still returned, with
    /// an [`UnbalancedSettlement`](DataIntegrityWarning::UnbalancedSettlement)
    /// warning: money was created or destroyed upstream.
    pub fn plan_settlements(&self, balances: &[NetBalance]) -> SettlementPlan {
        let mut debtors: Vec<(&ParticipantId, Money)> = Vec::new();
        let mut creditors: Vec<(&ParticipantId, Money)> = Vec::new();
        for balance in balances {
            if balance.net.is_negligible() {
                continue;
            }
            if balance.net.is_negative() {
                debtors.push((&balance.participant_id, balance.net.abs()));
            } else {
                creditors.push((&balance.participant_id, balance.net));
            }
        }

        let total_debt: Money = debtors.iter().map(|(_, debt)| *debt).sum();
        let total_credit: Money = creditors.iter().map(|(_, credit)| *credit).sum();
        let summary = SettlementSummary {
            total_debt,
            total_credit,
            balanced: (total_debt - total_credit).is_zero(),
        };

        let mut settlements = Vec::new();
        let (mut d, mut c) = (0, 0);
        while d < debtors.len() && c < creditors.len() {
            let (debtor, debt) = &mut debtors[d];
            let (creditor, credit) = &mut creditors[c];

            let amount = (*debt).min(*credit);
            settlements.push(Settlement::new((*debtor).clone(), (*creditor).clone(), amount));
            *debt -= amount;
            *credit -= amount;

            if debt.is_negligible() {
                d += 1;
            }
            if credit.is_negligible() {
                c += 1;
            }
        }

        let mut warnings = Vec::new();
        if !summary.balanced {
            let warning = DataIntegrityWarning::UnbalancedSettlement {
                total_debt,
                total_credit,
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
        }

        tracing::debug!(
            debtors = debtors.len(),
            creditors = creditors.len(),
            transfers = settlements.len(),
            "settlements planned"
        );

        SettlementPlan {
            settlements,
            summary,
            warnings,
        }
    }
}
