use chrono::NaiveDate;
use pulse_config::Config;

use crate::errors::Result;
use crate::period::{BudgetPeriod, Payday};
use crate::status::{calculate_budget_status, BudgetStatus};
use crate::storage::BudgetStore;

/// Period and budget-status lookups driven by the user's configuration.
pub struct BudgetService;

impl BudgetService {
    pub fn period_for(config: &Config, reference: NaiveDate) -> Result<BudgetPeriod> {
        Ok(BudgetPeriod::resolve(reference, Payday::new(config.payday)?))
    }

    pub fn total_expense<S: BudgetStore>(store: &S, period: &BudgetPeriod) -> i64 {
        store
            .transactions_between(period.date_window())
            .iter()
            .filter(|txn| txn.is_expense())
            .map(|txn| txn.amount)
            .sum()
    }

    pub fn status_for<S: BudgetStore>(
        store: &S,
        config: &Config,
        reference: NaiveDate,
    ) -> Result<BudgetStatus> {
        let period = Self::period_for(config, reference)?;
        let spent = Self::total_expense(store, &period);
        let status = calculate_budget_status(
            config.monthly_budget,
            spent,
            period.remaining_days(reference),
        );
        tracing::debug!(
            %period,
            spent,
            remaining = status.remaining,
            "computed budget status"
        );
        Ok(status)
    }
}
