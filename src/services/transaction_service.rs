//! Business logic helpers for recording income and expenses.

use pulse_domain::{is_valid_amount, DomainError, Transaction};
use uuid::Uuid;

use crate::errors::{BudgetError, Result};
use crate::period::DateWindow;
use crate::storage::BudgetStore;

/// Validated CRUD over stored transactions.
pub struct TransactionService;

impl TransactionService {
    /// Stores a new transaction and returns its identifier.
    pub fn add<S: BudgetStore>(store: &mut S, transaction: Transaction) -> Result<Uuid> {
        Self::validate(store, &transaction)?;
        let id = transaction.id;
        tracing::info!(
            %id,
            kind = %transaction.kind,
            amount = transaction.amount,
            "adding transaction"
        );
        store.insert_transaction(transaction)?;
        Ok(id)
    }

    /// Applies `mutator` to the stored transaction and saves it if it is still valid.
    pub fn update<S, F>(store: &mut S, id: Uuid, mutator: F) -> Result<Transaction>
    where
        S: BudgetStore,
        F: FnOnce(&mut Transaction),
    {
        let mut txn = store
            .transaction(id)
            .ok_or_else(|| BudgetError::not_found("Transaction", id))?;
        mutator(&mut txn);
        txn.id = id;
        Self::validate(store, &txn)?;
        txn.touch();
        store.update_transaction(txn.clone())?;
        tracing::info!(%id, "updated transaction");
        Ok(txn)
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove<S: BudgetStore>(store: &mut S, id: Uuid) -> Result<Transaction> {
        let removed = store.delete_transaction(id)?;
        tracing::info!(%id, "removed transaction");
        Ok(removed)
    }

    pub fn list_between<S: BudgetStore>(store: &S, window: DateWindow) -> Vec<Transaction> {
        store.transactions_between(window)
    }

    fn validate<S: BudgetStore>(store: &S, txn: &Transaction) -> Result<()> {
        Self::check(store, txn).map_err(|err| {
            tracing::warn!(id = %txn.id, error = %err, "rejected transaction");
            err
        })
    }

    fn check<S: BudgetStore>(store: &S, txn: &Transaction) -> Result<()> {
        if !is_valid_amount(txn.amount) {
            return Err(DomainError::InvalidAmount(txn.amount.to_string()).into());
        }
        let category = store
            .category(txn.category_id)
            .ok_or_else(|| BudgetError::not_found("Category", txn.category_id))?;
        if category.kind != txn.kind {
            return Err(BudgetError::InvalidInput(format!(
                "category `{}` is for {} entries, not {}",
                category.name, category.kind, txn.kind
            )));
        }
        if let Some(method_id) = txn.payment_method_id {
            if store.payment_method(method_id).is_none() {
                return Err(BudgetError::not_found("Payment method", method_id));
            }
        }
        Ok(())
    }
}
