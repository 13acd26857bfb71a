use std::str::FromStr;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use engine::{
    BalanceStatus, DataIntegrityWarning, Engine, EngineError, Event, Expense, Money, NetBalance,
    ParticipantId, Payment, Settlement, SplitDefinition, create_equal_split, net_balances,
};

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal")
}

fn money(value: &str) -> Money {
    value.parse().expect("valid amount")
}

fn date(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

fn participants(ids: &[&str]) -> Vec<ParticipantId> {
    ids.iter().map(|id| ParticipantId::from(*id)).collect()
}

fn assert_within_cent(actual: Money, expected: &str) {
    let expected = money(expected);
    assert!(
        (actual - expected).abs() <= Money::new(1),
        "expected {expected} (±0.01), got {actual}"
    );
}

/// Four friends on a trip: the reference scenario.
fn trip_expenses() -> Vec<Expense> {
    vec![
        Expense::new(
            "dinner",
            "trip",
            money("80"),
            "A",
            date(1),
            create_equal_split(["A", "B", "C", "D"]).unwrap(),
        )
        .unwrap(),
        Expense::new(
            "taxi",
            "trip",
            money("30"),
            "B",
            date(2),
            SplitDefinition::percentage([
                ("A", dec("33.33")),
                ("B", dec("33.33")),
                ("C", dec("33.34")),
                ("D", Decimal::ZERO),
            ]),
        )
        .unwrap(),
        Expense::new(
            "museum",
            "trip",
            money("40"),
            "C",
            date(3),
            SplitDefinition::percentage([
                ("A", dec("25")),
                ("B", dec("25")),
                ("C", Decimal::ZERO),
                ("D", dec("50")),
            ]),
        )
        .unwrap(),
    ]
}

#[test]
fn trip_scenario_matches_hand_computed_reference() {
    let engine = Engine::builder().build();
    let people = participants(&["A", "B", "C", "D"]);

    let balances = engine
        .calculate_event_balance("trip", &trip_expenses(), &[], &people)
        .unwrap();

    assert_within_cent(balances["A"].net, "40.00");
    assert_within_cent(balances["B"].net, "-10.00");
    assert_within_cent(balances["C"].net, "9.98");
    assert_within_cent(balances["D"].net, "-40.00");

    assert_eq!(balances["A"].net, money("40.01"));
    assert_eq!(balances["B"].net, money("-9.99"));
    assert_eq!(balances["C"].net, money("9.98"));
    assert_eq!(balances["D"].net, money("-40.00"));

    assert_eq!(balances["A"].paid, money("80"));
    assert_eq!(balances["A"].owed, money("39.99"));
    assert_eq!(balances["D"].paid, Money::ZERO);

    let total: Money = balances.values().map(|b| b.net).sum();
    assert_eq!(total, Money::ZERO);
}

#[test]
fn every_declared_participant_is_listed_in_order() {
    let engine = Engine::default();
    let people = participants(&["D", "C", "B", "A", "E"]);

    let balances = engine
        .calculate_event_balance("trip", &trip_expenses(), &[], &people)
        .unwrap();

    let order: Vec<&str> = balances.keys().map(ParticipantId::as_str).collect();
    assert_eq!(order, vec!["D", "C", "B", "A", "E"]);
    assert_eq!(balances["E"].net, Money::ZERO);
    assert_eq!(balances["E"].status(), BalanceStatus::Settled);
}

#[test]
fn only_the_requested_event_is_folded_in() {
    let engine = Engine::default();
    let people = participants(&["A", "B"]);
    let expenses = vec![
        Expense::new(
            "lunch",
            "work",
            money("10"),
            "A",
            date(1),
            create_equal_split(["A", "B"]).unwrap(),
        )
        .unwrap(),
        Expense::new(
            "beer",
            "pub",
            money("50"),
            "B",
            date(1),
            create_equal_split(["A", "B"]).unwrap(),
        )
        .unwrap(),
    ];
    let payments = vec![
        Payment::new("p1", "B", money("5"), date(2), Some("work".into())),
        Payment::new("p2", "B", money("7"), date(2), Some("pub".into())),
        Payment::new("p3", "B", money("9"), date(2), None),
    ];

    let balances = engine
        .calculate_event_balance("work", &expenses, &payments, &people)
        .unwrap();

    assert_eq!(balances["A"].net, money("5"));
    assert_eq!(balances["B"].paid, money("5"));
    assert_eq!(balances["B"].net, Money::ZERO);
}

#[test]
fn direct_payments_settle_a_debtor() {
    let engine = Engine::default();
    let people = participants(&["A", "B", "C", "D"]);
    let payments = vec![Payment::new(
        "refund",
        "D",
        money("40"),
        date(4),
        Some("trip".into()),
    )];

    let balances = engine
        .calculate_event_balance("trip", &trip_expenses(), &payments, &people)
        .unwrap();

    assert_eq!(balances["D"].net, Money::ZERO);
    assert_eq!(balances["D"].status(), BalanceStatus::Settled);
}

#[test]
fn invalid_expense_aborts_the_event_calculation() {
    let engine = Engine::default();
    let mut expenses = trip_expenses();
    expenses[0].amount = Money::ZERO;

    let err = engine
        .calculate_event_balance("trip", &expenses, &[], &participants(&["A", "B", "C", "D"]))
        .unwrap_err();
    assert!(matches!(err, EngineError::ExpenseInvalid(_)));
}

#[test]
fn unknown_split_members_are_reported_not_fatal() {
    let engine = Engine::default();
    let event = Event::new("trip", "Trip", ["A", "B", "C"]);

    let warnings = engine.event_integrity_warnings(&event, &trip_expenses());
    assert_eq!(
        warnings,
        vec![
            DataIntegrityWarning::UnknownSplitParticipant {
                event_id: "trip".into(),
                expense_id: "dinner".into(),
                participant_id: "D".into(),
            },
            DataIntegrityWarning::UnknownSplitParticipant {
                event_id: "trip".into(),
                expense_id: "taxi".into(),
                participant_id: "D".into(),
            },
            DataIntegrityWarning::UnknownSplitParticipant {
                event_id: "trip".into(),
                expense_id: "museum".into(),
                participant_id: "D".into(),
            },
        ]
    );

    // The calculation still succeeds and accounts for the stray participant.
    let balances = engine
        .calculate_event_balance("trip", &trip_expenses(), &[], &event.participant_ids)
        .unwrap();
    assert_eq!(balances["D"].owed, money("40"));
}

#[test]
fn user_balance_across_events() {
    let engine = Engine::default();
    let mut expenses = trip_expenses();
    expenses.push(
        Expense::new(
            "groceries",
            "flat",
            money("60"),
            "D",
            date(10),
            create_equal_split(["A", "D"]).unwrap(),
        )
        .unwrap(),
    );
    let payments = vec![Payment::new("advance", "D", money("5"), date(11), None)];

    let d = ParticipantId::from("D");
    let balance = engine
        .user_balance_from_ledger(&d, &expenses, &payments)
        .unwrap();

    // owed: 20 (dinner) + 0 (taxi, zero weight) + 20 (museum) + 30 (groceries)
    assert_eq!(balance.balance.owed, money("70"));
    // paid: 60 (groceries) + 5 (advance)
    assert_eq!(balance.balance.paid, money("65"));
    assert_eq!(balance.balance.net, money("-5"));
    assert_eq!(balance.status, BalanceStatus::Owes);
}

#[test]
fn user_balance_takes_selected_inputs_as_given() {
    let engine = Engine::default();
    let expenses = trip_expenses();
    let a = ParticipantId::from("A");

    let as_payer: Vec<Expense> = expenses.iter().filter(|e| e.payer_id == a).cloned().collect();
    let balance = engine
        .calculate_user_balance(&a, &expenses, &as_payer, &[])
        .unwrap();

    assert_eq!(balance.balance.owed, money("39.99"));
    assert_eq!(balance.balance.paid, money("80"));
    assert_eq!(balance.status, BalanceStatus::Owed);
}

#[test]
fn recalculation_is_idempotent() {
    let engine = Engine::default();
    let expenses = trip_expenses();
    let people = participants(&["A", "B", "C", "D"]);
    let payments = vec![Payment::new("p", "B", money("3.50"), date(5), Some("trip".into()))];

    let first = engine
        .calculate_event_balance("trip", &expenses, &payments, &people)
        .unwrap();
    let second = engine
        .calculate_event_balance("trip", &expenses, &payments, &people)
        .unwrap();
    assert_eq!(first, second);

    let group_first = engine.group_balances(&people, &expenses, &payments).unwrap();
    let group_second = engine.group_balances(&people, &expenses, &payments).unwrap();
    assert_eq!(group_first, group_second);
}

#[test]
fn event_settlement_zeroes_every_balance() {
    let engine = Engine::default();
    let people = participants(&["A", "B", "C", "D"]);
    let balances = engine
        .calculate_event_balance("trip", &trip_expenses(), &[], &people)
        .unwrap();

    let plan = engine.plan_settlements(&net_balances(&balances));
    assert_eq!(
        plan.settlements,
        vec![
            Settlement::new("B", "A", money("9.99")),
            Settlement::new("D", "A", money("30.02")),
            Settlement::new("D", "C", money("9.98")),
        ]
    );
    assert!(plan.summary.balanced);
    assert_eq!(plan.summary.total_debt, money("49.99"));

    // Applying the plan as direct payments settles everyone.
    let mut after = balances.clone();
    for settlement in &plan.settlements {
        after[settlement.from.as_str()].net += settlement.amount;
        after[settlement.to.as_str()].net -= settlement.amount;
    }
    assert!(after.values().all(|b| b.net.is_negligible()));
}

#[test]
fn group_settlement_uses_cross_event_balances() {
    let engine = Engine::default();
    let people = participants(&["A", "B", "C", "D"]);
    let group = engine.group_balances(&people, &trip_expenses(), &[]).unwrap();

    let nets: Vec<NetBalance> = group.iter().map(NetBalance::from).collect();
    let plan = engine.plan_settlements(&nets);

    assert!(plan.summary.balanced);
    assert_eq!(plan.transferred(), money("49.99"));
}

#[test]
fn reference_settlement_example() {
    let engine = Engine::default();
    let plan = engine.plan_settlements(&[
        NetBalance::new("A", money("30")),
        NetBalance::new("B", money("-20")),
        NetBalance::new("C", money("-10")),
    ]);

    assert_eq!(
        plan.settlements,
        vec![
            Settlement::new("B", "A", money("20")),
            Settlement::new("C", "A", money("10")),
        ]
    );
    assert!(plan.summary.balanced);
}

#[test]
fn overflowing_event_totals_are_an_error() {
    let engine = Engine::default();
    let huge = Money::new(i64::MAX / 2 + 10);
    let expenses: Vec<Expense> = ["first", "second"]
        .into_iter()
        .map(|id| {
            Expense::new(id, "trip", huge, "a", date(1), create_equal_split(["a"]).unwrap())
                .unwrap()
        })
        .collect();

    let err = engine
        .calculate_event_balance("trip", &expenses, &[], &participants(&["a"]))
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let a = ParticipantId::from("a");
    let err = engine
        .user_balance_from_ledger(&a, &expenses, &[])
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[test]
fn payer_missing_from_the_split_is_reported() {
    let engine = Engine::default();
    let event = Event::new("trip", "Trip", ["A", "B", "C"]);
    // Stored records bypass `Expense::new`, so the invariant can be broken.
    let taxi = Expense {
        id: "taxi".into(),
        event_id: "trip".into(),
        amount: money("30"),
        payer_id: "C".into(),
        date: date(2),
        split: create_equal_split(["A", "B"]).unwrap(),
    };
    assert!(matches!(taxi.validate(), Err(EngineError::SplitInvalid(_))));

    let warnings = engine.event_integrity_warnings(&event, &[taxi]);
    assert_eq!(
        warnings,
        vec![DataIntegrityWarning::PayerNotInSplit {
            event_id: "trip".into(),
            expense_id: "taxi".into(),
            payer_id: "C".into(),
        }]
    );
}
