//! Category insights for a budget period: caution and room buckets,
//! month-over-month comparison and upcoming scheduled transactions.

pub mod upcoming;

use std::collections::HashMap;

use chrono::NaiveDate;
use pulse_config::InsightThresholds;
use pulse_domain::{Category, RecurringTransaction, Transaction, TransactionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::period::BudgetPeriod;
use crate::status::{classify, percent_used, StatusLevel};

pub use upcoming::{project_upcoming, UpcomingItem, UpcomingSummary};

/// Spend of one expense category in the current period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryUsage {
    pub category_id: Uuid,
    pub name: String,
    pub order: u32,
    pub spent: i64,
    pub budget: Option<i64>,
    pub remaining: Option<i64>,
    pub percent_used: Option<f64>,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryComparison {
    pub category_id: Uuid,
    pub name: String,
    pub current: i64,
    pub previous: i64,
    /// Percent change, see [`calculate_mom_change`].
    pub change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insights {
    pub period: BudgetPeriod,
    pub total_expense: i64,
    pub total_income: i64,
    pub previous_total_expense: i64,
    pub expense_change: f64,
    /// Expense not attributable to a known category.
    pub uncategorized_expense: i64,
    pub category_usage: Vec<CategoryUsage>,
    pub caution: Vec<CategoryUsage>,
    pub room: Vec<CategoryUsage>,
    pub compare: Vec<CategoryComparison>,
    pub upcoming: UpcomingSummary,
}

/// Everything the aggregator reads. Callers fetch the slices from storage.
#[derive(Debug, Clone, Copy)]
pub struct InsightInput<'a> {
    pub period: BudgetPeriod,
    pub reference: NaiveDate,
    pub current: &'a [Transaction],
    pub previous: &'a [Transaction],
    pub categories: &'a [Category],
    pub recurring: &'a [RecurringTransaction],
    pub thresholds: InsightThresholds,
}

/// Percent change from `previous` to `current` with one decimal.
///
/// A zero baseline saturates: any growth reports `100`, no spend on either
/// side reports `0`.
pub fn calculate_mom_change(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    ((current - previous) as f64 / previous as f64 * 1000.0).round() / 10.0
}

/// Builds every insight list for the input period. Pure: no storage access.
pub fn aggregate(input: &InsightInput<'_>) -> Insights {
    let current_by_category = expense_by_category(input.current);
    let previous_by_category = expense_by_category(input.previous);

    let mut expense_categories: Vec<&Category> = input
        .categories
        .iter()
        .filter(|category| category.kind == TransactionKind::Expense)
        .collect();
    expense_categories.sort_by(|a, b| a.order.cmp(&b.order).then(a.name.cmp(&b.name)));

    let category_usage: Vec<CategoryUsage> = expense_categories
        .iter()
        .filter_map(|category| {
            let spent = current_by_category.get(&category.id).copied().unwrap_or(0);
            if spent == 0 && !category.has_budget() {
                return None;
            }
            Some(usage_for(category, spent, &input.thresholds))
        })
        .collect();

    let caution = category_usage
        .iter()
        .filter(|usage| {
            matches!(usage.percent_used, Some(percent) if percent >= input.thresholds.caution_percent)
        })
        .cloned()
        .collect();
    let room = category_usage
        .iter()
        .filter(|usage| {
            matches!(usage.percent_used, Some(percent) if percent < input.thresholds.room_percent)
        })
        .cloned()
        .collect();

    let compare = expense_categories
        .iter()
        .filter_map(|category| {
            let current = current_by_category.get(&category.id).copied().unwrap_or(0);
            let previous = previous_by_category.get(&category.id).copied().unwrap_or(0);
            if current == 0 && previous == 0 {
                return None;
            }
            Some(CategoryComparison {
                category_id: category.id,
                name: category.name.clone(),
                current,
                previous,
                change: calculate_mom_change(current, previous),
            })
        })
        .collect();

    let known: Vec<Uuid> = expense_categories.iter().map(|c| c.id).collect();
    let uncategorized_expense = current_by_category
        .iter()
        .filter(|(id, _)| !known.contains(*id))
        .map(|(_, amount)| *amount)
        .sum();

    let total_expense = total_of(input.current, TransactionKind::Expense);
    let previous_total_expense = total_of(input.previous, TransactionKind::Expense);
    let upcoming_from = input.reference.max(input.period.start_date());
    let upcoming = project_upcoming(input.recurring, upcoming_from, input.period.end_date());

    Insights {
        period: input.period,
        total_expense,
        total_income: total_of(input.current, TransactionKind::Income),
        previous_total_expense,
        expense_change: calculate_mom_change(total_expense, previous_total_expense),
        uncategorized_expense,
        category_usage,
        caution,
        room,
        compare,
        upcoming,
    }
}

fn usage_for(category: &Category, spent: i64, thresholds: &InsightThresholds) -> CategoryUsage {
    let budget = category.budget.filter(|amount| *amount > 0);
    let percent = budget.and_then(|amount| percent_used(spent, amount));
    let remaining = budget.map(|amount| amount - spent);
    let over = remaining.map_or(false, |value| value < 0);
    CategoryUsage {
        category_id: category.id,
        name: category.name.clone(),
        order: category.order,
        spent,
        budget,
        remaining,
        percent_used: percent,
        level: classify(percent, over, thresholds),
    }
}

fn expense_by_category(transactions: &[Transaction]) -> HashMap<Uuid, i64> {
    let mut totals: HashMap<Uuid, i64> = HashMap::new();
    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        *totals.entry(txn.category_id).or_default() += txn.amount;
    }
    totals
}

fn total_of(transactions: &[Transaction], kind: TransactionKind) -> i64 {
    transactions
        .iter()
        .filter(|txn| txn.kind == kind)
        .map(|txn| txn.amount)
        .sum()
}
