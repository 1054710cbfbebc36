use chrono::NaiveDate;
use pulse_config::Config;

use crate::errors::Result;
use crate::insights::{aggregate, InsightInput, Insights};
use crate::storage::BudgetStore;

use super::BudgetService;

pub struct InsightService;

impl InsightService {
    /// Loads the current and previous periods around `reference` and
    /// aggregates them.
    pub fn generate<S: BudgetStore>(
        store: &S,
        config: &Config,
        reference: NaiveDate,
    ) -> Result<Insights> {
        let period = BudgetService::period_for(config, reference)?;
        let previous_period = period.previous();
        let current = store.transactions_between(period.date_window());
        let previous = store.transactions_between(previous_period.date_window());
        let categories = store.categories();
        let recurring = store.recurring_transactions();

        let insights = aggregate(&InsightInput {
            period,
            reference,
            current: &current,
            previous: &previous,
            categories: &categories,
            recurring: &recurring,
            thresholds: config.insights,
        });
        tracing::debug!(
            %period,
            caution = insights.caution.len(),
            room = insights.room.len(),
            upcoming = insights.upcoming.items.len(),
            "generated insights"
        );
        Ok(insights)
    }
}
