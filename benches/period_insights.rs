use budget_pulse::insights::{aggregate, InsightInput};
use budget_pulse::{BudgetPeriod, Payday};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pulse_config::InsightThresholds;
use pulse_domain::{default_categories, Category, Transaction, TransactionKind};

fn sample_transactions(categories: &[Category], start: NaiveDate, count: usize) -> Vec<Transaction> {
    let expense: Vec<&Category> = categories
        .iter()
        .filter(|category| category.kind == TransactionKind::Expense)
        .collect();
    (0..count)
        .filter_map(|idx| {
            let category = expense[idx % expense.len()];
            let date = start + Duration::days((idx % 30) as i64);
            Transaction::expense(category.id, 1_000 + (idx as i64 % 50) * 100, date).ok()
        })
        .collect()
}

fn bench_period_resolution(c: &mut Criterion) {
    let payday = Payday::new(31).expect("valid payday");
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    c.bench_function("resolve_period_full_year", |b| {
        b.iter(|| {
            for offset in 0..366 {
                black_box(BudgetPeriod::resolve(start + Duration::days(offset), payday));
            }
        })
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let categories: Vec<Category> = default_categories()
        .into_iter()
        .map(|category| match category.kind {
            TransactionKind::Expense => category.with_budget(300_000),
            TransactionKind::Income => category,
        })
        .collect();
    let reference = NaiveDate::from_ymd_opt(2025, 8, 10).expect("valid date");
    let period = BudgetPeriod::resolve(reference, Payday::new(25).expect("valid payday"));
    let current = sample_transactions(&categories, period.start_date(), 5_000);
    let previous = sample_transactions(&categories, period.previous().start_date(), 5_000);
    let input = InsightInput {
        period,
        reference,
        current: &current,
        previous: &previous,
        categories: &categories,
        recurring: &[],
        thresholds: InsightThresholds::default(),
    };
    c.bench_function("aggregate_5k_transactions", |b| {
        b.iter(|| black_box(aggregate(black_box(&input))))
    });
}

criterion_group!(benches, bench_period_resolution, bench_aggregate);
criterion_main!(benches);
