use crate::{Expense, ExpenseBalance, ResultEngine};

use super::Engine;

impl Engine {
    /// Splits one expense into per-participant shares.
    ///
    /// The shares are what each participant owes for this expense, regardless
    /// of who paid it; crediting the payer happens one layer up. Zero-weight
    /// participants are not listed.
    ///
    /// Fails with [`ExpenseInvalid`](crate::EngineError::ExpenseInvalid) for a
    /// non-positive amount or an empty split, and with
    /// [`SplitInvalid`](crate::EngineError::SplitInvalid) when the weights are
    /// broken.
    pub fn calculate_expense_balances(&self, expense: &Expense) -> ResultEngine<ExpenseBalance> {
        expense.ensure_calculable()?;
        let balances = self.allocate_for_payer(expense.amount, &expense.split, &expense.payer_id)?;

        tracing::debug!(
            expense = %expense.id,
            amount = %expense.amount,
            participants = balances.len(),
            "expense allocated"
        );

        Ok(ExpenseBalance {
            expense_id: expense.id.clone(),
            payer_id: expense.payer_id.clone(),
            total_amount: expense.amount,
            balances,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::{
        Engine, EngineError, Expense, Money, RemainderPolicy, SplitDefinition, create_equal_split,
    };

    fn expense(amount: Money, payer: &str, split: SplitDefinition) -> Expense {
        Expense {
            id: "e1".into(),
            event_id: "ev".into(),
            amount,
            payer_id: payer.into(),
            date: Utc::now(),
            split,
        }
    }

    #[test]
    fn shares_do_not_include_the_payer_credit() {
        let engine = Engine::builder().build();
        let split = create_equal_split(["a", "b", "c", "d"]).unwrap();
        let result = engine
            .calculate_expense_balances(&expense(Money::new(80_00), "a", split))
            .unwrap();

        assert_eq!(result.expense_id.as_str(), "e1");
        assert_eq!(result.payer_id.as_str(), "a");
        assert_eq!(result.total_amount, Money::new(80_00));
        assert!(result.balances.values().all(|m| *m == Money::new(20_00)));
    }

    #[test]
    fn payer_policy_is_applied() {
        let engine = Engine::builder()
            .remainder_policy(RemainderPolicy::Payer)
            .build();
        let split = create_equal_split(["a", "b", "c"]).unwrap();
        let result = engine
            .calculate_expense_balances(&expense(Money::new(10_00), "b", split))
            .unwrap();
        assert_eq!(result.balances["b"], Money::new(3_34));
        assert_eq!(result.balances["a"], Money::new(3_33));
    }

    #[test]
    fn rejects_malformed_expenses() {
        let engine = Engine::default();
        let split = create_equal_split(["a"]).unwrap();
        assert!(matches!(
            engine.calculate_expense_balances(&expense(Money::new(-5), "a", split)),
            Err(EngineError::ExpenseInvalid(_))
        ));

        let empty = SplitDefinition::Percentage(Default::default());
        assert!(matches!(
            engine.calculate_expense_balances(&expense(Money::new(5_00), "a", empty)),
            Err(EngineError::ExpenseInvalid(_))
        ));

        let broken = SplitDefinition::percentage([("a", Decimal::from(60))]);
        assert!(matches!(
            engine.calculate_expense_balances(&expense(Money::new(5_00), "a", broken)),
            Err(EngineError::SplitInvalid(_))
        ));
    }
}
