use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDate, NaiveTime};
use pulse_domain::{Category, PaymentMethod, RecurringTransaction, Transaction};
use uuid::Uuid;

use super::{BudgetStore, StoreSnapshot, CURRENT_SCHEMA_VERSION};
use crate::{
    errors::{BudgetError, Result},
    period::DateWindow,
};

type DateKey = (NaiveDate, NaiveTime, Uuid);

/// In-process store with a date index for range queries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: HashMap<Uuid, Transaction>,
    by_date: BTreeSet<DateKey>,
    categories: HashMap<Uuid, Category>,
    payment_methods: HashMap<Uuid, PaymentMethod>,
    recurring: HashMap<Uuid, RecurringTransaction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        let mut store = Self::new();
        for txn in snapshot.transactions {
            store.index(txn);
        }
        store.categories = snapshot
            .categories
            .into_iter()
            .map(|category| (category.id, category))
            .collect();
        store.payment_methods = snapshot
            .payment_methods
            .into_iter()
            .map(|method| (method.id, method))
            .collect();
        store.recurring = snapshot
            .recurring
            .into_iter()
            .map(|recurring| (recurring.id, recurring))
            .collect();
        store
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: self.all_transactions(),
            categories: self.categories(),
            payment_methods: self.payment_methods(),
            recurring: self.recurring_transactions(),
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    fn index(&mut self, txn: Transaction) {
        self.by_date.insert(date_key(&txn));
        self.transactions.insert(txn.id, txn);
    }

    fn unindex(&mut self, id: Uuid) -> Option<Transaction> {
        let txn = self.transactions.remove(&id)?;
        self.by_date.remove(&date_key(&txn));
        Some(txn)
    }

    fn collect_keys<'a>(&self, keys: impl Iterator<Item = &'a DateKey>) -> Vec<Transaction> {
        keys.filter_map(|(_, _, id)| self.transactions.get(id).cloned())
            .collect()
    }
}

fn date_key(txn: &Transaction) -> DateKey {
    (txn.date, txn.time, txn.id)
}

fn sorted_by_order<T: Clone>(items: &HashMap<Uuid, T>, key: impl Fn(&T) -> (u32, String)) -> Vec<T> {
    let mut values: Vec<T> = items.values().cloned().collect();
    values.sort_by_key(key);
    values
}

impl BudgetStore for MemoryStore {
    fn transaction(&self, id: Uuid) -> Option<Transaction> {
        self.transactions.get(&id).cloned()
    }

    fn transactions_between(&self, window: DateWindow) -> Vec<Transaction> {
        let lower = (window.start, NaiveTime::MIN, Uuid::nil());
        let upper = (window.end, NaiveTime::MIN, Uuid::nil());
        self.collect_keys(self.by_date.range(lower..upper))
    }

    fn transactions_for_category(&self, category_id: Uuid) -> Vec<Transaction> {
        self.collect_keys(self.by_date.iter())
            .into_iter()
            .filter(|txn| txn.category_id == category_id)
            .collect()
    }

    fn all_transactions(&self) -> Vec<Transaction> {
        self.collect_keys(self.by_date.iter())
    }

    fn insert_transaction(&mut self, transaction: Transaction) -> Result<()> {
        if self.transactions.contains_key(&transaction.id) {
            return Err(BudgetError::Conflict(format!(
                "transaction {} already exists",
                transaction.id
            )));
        }
        self.index(transaction);
        Ok(())
    }

    fn update_transaction(&mut self, transaction: Transaction) -> Result<()> {
        self.unindex(transaction.id)
            .ok_or_else(|| BudgetError::not_found("Transaction", transaction.id))?;
        self.index(transaction);
        Ok(())
    }

    fn delete_transaction(&mut self, id: Uuid) -> Result<Transaction> {
        self.unindex(id)
            .ok_or_else(|| BudgetError::not_found("Transaction", id))
    }

    fn category(&self, id: Uuid) -> Option<Category> {
        self.categories.get(&id).cloned()
    }

    fn categories(&self) -> Vec<Category> {
        let mut values: Vec<Category> = self.categories.values().cloned().collect();
        values.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then(a.order.cmp(&b.order))
                .then_with(|| a.name.cmp(&b.name))
        });
        values
    }

    fn upsert_category(&mut self, category: Category) -> Result<()> {
        self.categories.insert(category.id, category);
        Ok(())
    }

    fn delete_category(&mut self, id: Uuid) -> Result<Category> {
        self.categories
            .remove(&id)
            .ok_or_else(|| BudgetError::not_found("Category", id))
    }

    fn payment_method(&self, id: Uuid) -> Option<PaymentMethod> {
        self.payment_methods.get(&id).cloned()
    }

    fn payment_methods(&self) -> Vec<PaymentMethod> {
        sorted_by_order(&self.payment_methods, |method| {
            (method.order, method.name.clone())
        })
    }

    fn upsert_payment_method(&mut self, method: PaymentMethod) -> Result<()> {
        self.payment_methods.insert(method.id, method);
        Ok(())
    }

    fn delete_payment_method(&mut self, id: Uuid) -> Result<PaymentMethod> {
        self.payment_methods
            .remove(&id)
            .ok_or_else(|| BudgetError::not_found("Payment method", id))
    }

    fn recurring_transactions(&self) -> Vec<RecurringTransaction> {
        let mut values: Vec<RecurringTransaction> = self.recurring.values().cloned().collect();
        values.sort_by_key(|recurring| (recurring.start_date, recurring.id));
        values
    }

    fn upsert_recurring(&mut self, recurring: RecurringTransaction) -> Result<()> {
        self.recurring.insert(recurring.id, recurring);
        Ok(())
    }

    fn delete_recurring(&mut self, id: Uuid) -> Result<RecurringTransaction> {
        self.recurring
            .remove(&id)
            .ok_or_else(|| BudgetError::not_found("Recurring transaction", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense_on(category: Uuid, day: NaiveDate, hour: u32) -> Transaction {
        Transaction::expense(category, 1_000, day)
            .unwrap()
            .with_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
    }

    #[test]
    fn range_query_is_half_open_and_sorted() {
        let mut store = MemoryStore::new();
        let category = Uuid::new_v4();
        let late = expense_on(category, date(2025, 7, 1), 18);
        let early = expense_on(category, date(2025, 7, 1), 8);
        let excluded = expense_on(category, date(2025, 7, 31), 0);
        let before = expense_on(category, date(2025, 6, 30), 23);
        for txn in [&late, &early, &excluded, &before] {
            store.insert_transaction(txn.clone()).unwrap();
        }

        let window = DateWindow::new(date(2025, 7, 1), date(2025, 7, 31)).unwrap();
        let ids: Vec<Uuid> = store
            .transactions_between(window)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[test]
    fn update_reindexes_moved_dates() {
        let mut store = MemoryStore::new();
        let mut txn = expense_on(Uuid::new_v4(), date(2025, 7, 1), 9);
        store.insert_transaction(txn.clone()).unwrap();
        txn.date = date(2025, 8, 2);
        store.update_transaction(txn.clone()).unwrap();

        let july = DateWindow::new(date(2025, 7, 1), date(2025, 8, 1)).unwrap();
        let august = DateWindow::new(date(2025, 8, 1), date(2025, 9, 1)).unwrap();
        assert!(store.transactions_between(july).is_empty());
        assert_eq!(store.transactions_between(august).len(), 1);
    }

    #[test]
    fn duplicate_and_missing_ids_are_errors() {
        let mut store = MemoryStore::new();
        let txn = expense_on(Uuid::new_v4(), date(2025, 7, 1), 9);
        store.insert_transaction(txn.clone()).unwrap();
        assert!(matches!(
            store.insert_transaction(txn.clone()),
            Err(BudgetError::Conflict(_))
        ));
        store.delete_transaction(txn.id).unwrap();
        assert!(matches!(
            store.delete_transaction(txn.id),
            Err(BudgetError::NotFound { .. })
        ));
        assert!(store.update_transaction(txn).is_err());
    }

    #[test]
    fn snapshot_restores_indexes() {
        let mut store = MemoryStore::new();
        let food = Category::expense("Food").with_order(1);
        let cafe = Category::expense("Cafe").with_order(0);
        store.upsert_category(food.clone()).unwrap();
        store.upsert_category(cafe.clone()).unwrap();
        store
            .insert_transaction(expense_on(food.id, date(2025, 7, 3), 12))
            .unwrap();

        let restored = MemoryStore::from_snapshot(store.snapshot());
        assert_eq!(restored.transactions_for_category(food.id).len(), 1);
        let names: Vec<_> = restored.categories().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Cafe", "Food"]);
    }
}
