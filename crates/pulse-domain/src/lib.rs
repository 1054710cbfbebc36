//! pulse-domain
//!
//! Plain data model for budget_pulse: transactions, categories, payment
//! methods and recurring schedules. No storage, no I/O.

pub mod category;
pub mod common;
pub mod error;
pub mod payment_method;
pub mod recurring;
pub mod time_interval;
pub mod transaction;
pub mod validation;

pub use category::{default_categories, Category};
pub use common::{Identifiable, NamedEntity, Ordered};
pub use error::DomainError;
pub use payment_method::PaymentMethod;
pub use recurring::RecurringTransaction;
pub use time_interval::{days_in_month, shift_month, TimeInterval, TimeUnit};
pub use transaction::{Transaction, TransactionKind};
pub use validation::{is_valid_amount, parse_minor_units};
