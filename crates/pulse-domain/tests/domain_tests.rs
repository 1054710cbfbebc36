use chrono::NaiveDate;
use pulse_domain::{
    default_categories, parse_minor_units, Category, RecurringTransaction, TimeInterval, TimeUnit,
    Transaction, TransactionKind,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn month_end_schedules_do_not_drift() {
    let rent = RecurringTransaction::new(
        TransactionKind::Expense,
        Uuid::new_v4(),
        500_000,
        TimeInterval::monthly(),
        date(2025, 1, 31),
    )
    .unwrap();
    let dates = rent.occurrences_between(date(2025, 1, 1), date(2025, 5, 31));
    assert_eq!(
        dates,
        vec![
            date(2025, 1, 31),
            date(2025, 2, 28),
            date(2025, 3, 31),
            date(2025, 4, 30),
            date(2025, 5, 31),
        ]
    );
}

#[test]
fn ended_and_paused_schedules_stop_producing_dates() {
    let weekly = RecurringTransaction::new(
        TransactionKind::Expense,
        Uuid::new_v4(),
        10_000,
        TimeInterval::new(2, TimeUnit::Week).unwrap(),
        date(2025, 8, 1),
    )
    .unwrap()
    .ending_on(date(2025, 8, 20));
    assert_eq!(
        weekly.occurrences_between(date(2025, 8, 1), date(2025, 9, 30)),
        vec![date(2025, 8, 1), date(2025, 8, 15)]
    );
    assert_eq!(weekly.next_occurrence(date(2025, 8, 16)), None);

    let mut paused = weekly.clone();
    paused.is_active = false;
    assert!(paused
        .occurrences_between(date(2025, 8, 1), date(2025, 9, 30))
        .is_empty());
}

#[test]
fn oversized_intervals_stop_at_the_calendar_edge() {
    let schedule = |every, unit, start| {
        RecurringTransaction::new(
            TransactionKind::Expense,
            Uuid::new_v4(),
            10_000,
            TimeInterval::new(every, unit).unwrap(),
            start,
        )
        .unwrap()
    };

    let daily = schedule(200_000_000, TimeUnit::Day, date(2024, 1, 1));
    assert!(daily
        .occurrences_between(date(2025, 7, 1), date(2025, 7, 31))
        .is_empty());
    assert_eq!(daily.next_occurrence(date(2025, 7, 1)), None);

    let yearly = schedule(1_000_000, TimeUnit::Year, date(2025, 7, 1));
    assert_eq!(
        yearly.occurrences_between(date(2025, 7, 1), date(2025, 7, 31)),
        vec![date(2025, 7, 1)]
    );
    assert_eq!(yearly.next_occurrence(date(2025, 7, 2)), None);
}

#[test]
fn transactions_serialize_with_lowercase_kind() {
    let txn = Transaction::expense(Uuid::new_v4(), 4_500, date(2025, 8, 3))
        .unwrap()
        .with_description("coffee");
    let json = serde_json::to_value(&txn).unwrap();
    assert_eq!(json["kind"], "expense");
    assert_eq!(json["amount"], 4_500);
    assert!(json.get("memo").is_none());

    let back: Transaction = serde_json::from_value(json).unwrap();
    assert_eq!(back, txn);
}

#[test]
fn categories_load_without_optional_fields() {
    let raw = format!(
        r##"{{"id":"{}","name":"Food","kind":"expense","icon":"utensils","color":"#FF6B6B"}}"##,
        Uuid::new_v4()
    );
    let category: Category = serde_json::from_str(&raw).unwrap();
    assert_eq!(category.budget, None);
    assert_eq!(category.order, 0);
    assert!(!category.is_default);
}

#[test]
fn defaults_cover_both_kinds_and_amounts_parse() {
    let defaults = default_categories();
    assert!(defaults.iter().any(|c| c.kind == TransactionKind::Income));
    assert!(defaults.iter().any(|c| c.kind == TransactionKind::Expense));
    assert_eq!(parse_minor_units(" 1_234 ", 0), Some(1_234));
    assert_eq!(parse_minor_units("1_234.5", 2), Some(123_450));
    assert_eq!(parse_minor_units("-5", 2), None);
    assert_eq!(parse_minor_units("0", 0), None);
}
