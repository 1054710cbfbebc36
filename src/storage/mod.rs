pub mod json_backend;
pub mod memory;

use pulse_domain::{Category, PaymentMethod, RecurringTransaction, Transaction};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::Result, period::DateWindow};

pub use json_backend::JsonStore;
pub use memory::MemoryStore;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Key-indexed object store behind every service.
///
/// Reads return owned records. List queries are sorted: transactions by date
/// then time, categories and payment methods by their `order`.
pub trait BudgetStore {
    fn transaction(&self, id: Uuid) -> Option<Transaction>;
    /// Transactions dated inside the half-open window.
    fn transactions_between(&self, window: DateWindow) -> Vec<Transaction>;
    fn transactions_for_category(&self, category_id: Uuid) -> Vec<Transaction>;
    fn all_transactions(&self) -> Vec<Transaction>;
    fn insert_transaction(&mut self, transaction: Transaction) -> Result<()>;
    fn update_transaction(&mut self, transaction: Transaction) -> Result<()>;
    fn delete_transaction(&mut self, id: Uuid) -> Result<Transaction>;

    fn category(&self, id: Uuid) -> Option<Category>;
    fn categories(&self) -> Vec<Category>;
    fn upsert_category(&mut self, category: Category) -> Result<()>;
    fn delete_category(&mut self, id: Uuid) -> Result<Category>;
    /// Upserts several categories as a single change.
    fn upsert_categories(&mut self, categories: Vec<Category>) -> Result<()> {
        categories
            .into_iter()
            .try_for_each(|category| self.upsert_category(category))
    }

    fn payment_method(&self, id: Uuid) -> Option<PaymentMethod>;
    fn payment_methods(&self) -> Vec<PaymentMethod>;
    fn upsert_payment_method(&mut self, method: PaymentMethod) -> Result<()>;
    fn delete_payment_method(&mut self, id: Uuid) -> Result<PaymentMethod>;
    fn upsert_payment_methods(&mut self, methods: Vec<PaymentMethod>) -> Result<()> {
        methods
            .into_iter()
            .try_for_each(|method| self.upsert_payment_method(method))
    }

    fn recurring_transactions(&self) -> Vec<RecurringTransaction>;
    fn upsert_recurring(&mut self, recurring: RecurringTransaction) -> Result<()>;
    fn delete_recurring(&mut self, id: Uuid) -> Result<RecurringTransaction>;
}

/// Serialized form of a whole store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default = "StoreSnapshot::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    #[serde(default)]
    pub recurring: Vec<RecurringTransaction>,
}

impl StoreSnapshot {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
