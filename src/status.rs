//! Budget status derived from a period's spend and the monthly budget.

use pulse_config::InsightThresholds;
use serde::{Deserialize, Serialize};

/// Spend against the monthly budget for one period. Recomputed per view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub monthly_budget: i64,
    pub total_expense: i64,
    /// May be negative: over budget is a state, not an error.
    pub remaining: i64,
    pub daily_recommended: i64,
    /// One-decimal percentage; `None` when no budget is configured.
    pub percent_used: Option<f64>,
    pub is_over_budget: bool,
    pub remaining_days: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusLevel {
    Comfortable,
    Caution,
    Over,
    Unbudgeted,
}

impl BudgetStatus {
    pub fn level(&self, thresholds: &InsightThresholds) -> StatusLevel {
        classify(self.percent_used, self.is_over_budget, thresholds)
    }
}

pub fn calculate_budget_status(
    monthly_budget: i64,
    total_expense: i64,
    remaining_days: u32,
) -> BudgetStatus {
    let remaining = monthly_budget.saturating_sub(total_expense);
    let daily_recommended = if remaining > 0 && remaining_days > 0 {
        round_div(remaining, remaining_days as i64)
    } else {
        0
    };
    BudgetStatus {
        monthly_budget,
        total_expense,
        remaining,
        daily_recommended,
        percent_used: percent_used(total_expense, monthly_budget),
        is_over_budget: remaining < 0,
        remaining_days,
    }
}

/// `round(spent / budget * 1000) / 10`, undefined for a non-positive budget.
pub fn percent_used(spent: i64, budget: i64) -> Option<f64> {
    if budget <= 0 {
        return None;
    }
    Some((spent as f64 / budget as f64 * 1000.0).round() / 10.0)
}

pub(crate) fn classify(
    percent: Option<f64>,
    over: bool,
    thresholds: &InsightThresholds,
) -> StatusLevel {
    match percent {
        None => StatusLevel::Unbudgeted,
        Some(_) if over => StatusLevel::Over,
        Some(value) if value > 100.0 => StatusLevel::Over,
        Some(value) if value >= thresholds.caution_percent => StatusLevel::Caution,
        Some(_) => StatusLevel::Comfortable,
    }
}

// Both operands are positive here, so half-up and half-away-from-zero agree.
fn round_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    let rest = numerator % denominator;
    if rest >= denominator - rest {
        quotient + 1
    } else {
        quotient
    }
}
