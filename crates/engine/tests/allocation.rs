use std::str::FromStr;

use proptest::prelude::*;
use rust_decimal::Decimal;

use engine::{
    Money, ParticipantId, RemainderPolicy, SplitDefinition, allocate, allocate_with_policy,
    create_equal_split,
};

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal")
}

fn shares(weights: &[u32]) -> SplitDefinition {
    SplitDefinition::shares(
        weights
            .iter()
            .enumerate()
            .map(|(idx, weight)| (format!("p{idx}"), Decimal::from(*weight))),
    )
}

proptest! {
    #[test]
    fn allocation_sums_to_the_total(
        cents in 0i64..=10_000_000,
        weights in prop::collection::vec(0u32..=20, 1..=8),
        payer_idx in 0usize..8,
        use_payer_policy in any::<bool>(),
    ) {
        prop_assume!(weights.iter().any(|w| *w > 0));
        let split = shares(&weights);
        let payer = ParticipantId::new(format!("p{}", payer_idx % weights.len()));
        let policy = if use_payer_policy {
            RemainderPolicy::Payer
        } else {
            RemainderPolicy::LastParticipant
        };

        let owed = allocate_with_policy(Money::new(cents), &split, policy, Some(&payer))
            .expect("valid split");

        let total: Money = owed.values().sum();
        prop_assert_eq!(total, Money::new(cents));
        prop_assert!(owed.values().all(|m| !m.is_negative()));

        let charged = weights.iter().filter(|w| **w > 0).count();
        prop_assert_eq!(owed.len(), charged);
    }

    #[test]
    fn percentage_form_allocates_the_same_total(
        cents in 1i64..=1_000_000,
        weights in prop::collection::vec(0u32..=20, 1..=8),
    ) {
        prop_assume!(weights.iter().any(|w| *w > 0));
        let percentages = shares(&weights).to_percentages().expect("valid split");

        let owed = allocate(Money::new(cents), &percentages).expect("valid split");
        let total: Money = owed.values().sum();
        prop_assert_eq!(total, Money::new(cents));
    }

    #[test]
    fn equal_splits_differ_by_at_most_one_cent(
        cents in 0i64..=10_000_000,
        count in 1usize..=12,
    ) {
        let split = create_equal_split((0..count).map(|idx| format!("p{idx}")))
            .expect("non-empty");
        let owed = allocate(Money::new(cents), &split).expect("valid split");

        let min = owed.values().min().copied().unwrap_or_default();
        let max = owed.values().max().copied().unwrap_or_default();
        prop_assert!(max - min <= Money::new(1));
        prop_assert_eq!(owed.values().sum::<Money>(), Money::new(cents));
    }
}

#[test]
fn equivalent_percentages_and_shares_allocate_identically() {
    let cases = [
        (vec!["25", "50", "25"], vec!["1", "2", "1"]),
        (vec!["10", "20", "70"], vec!["1", "2", "7"]),
        (vec!["12.5", "37.5", "50"], vec!["1", "3", "4"]),
    ];

    for (percentages, share_weights) in cases {
        let percentage_split = SplitDefinition::percentage(
            ["a", "b", "c"].into_iter().zip(percentages.iter().map(|w| dec(w))),
        );
        let share_split = SplitDefinition::shares(
            ["a", "b", "c"].into_iter().zip(share_weights.iter().map(|w| dec(w))),
        );

        for cents in [1_00, 100_00, 99_99, 1, 12_345_67] {
            assert_eq!(
                allocate(Money::new(cents), &percentage_split).unwrap(),
                allocate(Money::new(cents), &share_split).unwrap(),
                "{percentages:?} vs {share_weights:?} on {cents} cents"
            );
        }
    }
}

#[test]
fn ten_dollars_three_ways() {
    let split = create_equal_split(["a", "b", "c"]).unwrap();
    let owed = allocate(Money::new(10_00), &split).unwrap();

    let amounts: Vec<String> = owed.values().map(ToString::to_string).collect();
    assert_eq!(amounts, vec!["3.33", "3.33", "3.34"]);
}
