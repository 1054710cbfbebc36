#![doc(test(attr(deny(warnings))))]

//! budget_pulse computes payday-anchored budget periods, spend status and
//! category insights over a local transaction store.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod insights;
pub mod period;
pub mod scroll_spy;
pub mod services;
pub mod status;
pub mod storage;
pub mod utils;

pub use errors::{BudgetError, Result};
pub use insights::{aggregate, calculate_mom_change, InsightInput, Insights};
pub use period::{get_budget_period, BudgetPeriod, DateWindow, Payday};
pub use status::{calculate_budget_status, BudgetStatus, StatusLevel};
pub use storage::{BudgetStore, JsonStore, MemoryStore};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("budget_pulse tracing initialized");
    });
}
