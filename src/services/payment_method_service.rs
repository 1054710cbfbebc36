use pulse_domain::PaymentMethod;
use uuid::Uuid;

use crate::errors::{BudgetError, Result};
use crate::storage::BudgetStore;

use super::{apply_order, ensure_unique_name, next_order, validate_name};

pub struct PaymentMethodService;

impl PaymentMethodService {
    pub fn add<S: BudgetStore>(store: &mut S, mut method: PaymentMethod) -> Result<Uuid> {
        method.name = validate_name(&method.name)?;
        let existing = store.payment_methods();
        ensure_unique_name(&existing, None, &method.name, "Payment method")?;
        method.order = next_order(&existing);
        let id = method.id;
        tracing::info!(%id, name = %method.name, "adding payment method");
        store.upsert_payment_method(method)?;
        Ok(id)
    }

    pub fn rename<S: BudgetStore>(store: &mut S, id: Uuid, name: &str) -> Result<PaymentMethod> {
        let mut method = Self::get(store, id)?;
        let name = validate_name(name)?;
        ensure_unique_name(&store.payment_methods(), Some(id), &name, "Payment method")?;
        method.name = name;
        store.upsert_payment_method(method.clone())?;
        Ok(method)
    }

    /// Removes a payment method no transaction or schedule still points at.
    pub fn remove<S: BudgetStore>(store: &mut S, id: Uuid) -> Result<PaymentMethod> {
        let method = Self::get(store, id)?;
        if method.is_default {
            return Err(BudgetError::Conflict(format!(
                "default payment method `{}` cannot be removed",
                method.name
            )));
        }
        let referenced = store
            .all_transactions()
            .iter()
            .any(|txn| txn.payment_method_id == Some(id))
            || store
                .recurring_transactions()
                .iter()
                .any(|recurring| recurring.payment_method_id == Some(id));
        if referenced {
            return Err(BudgetError::Conflict(format!(
                "payment method `{}` is still in use",
                method.name
            )));
        }
        let removed = store.delete_payment_method(id)?;
        tracing::info!(%id, name = %removed.name, "removed payment method");
        Ok(removed)
    }

    pub fn reorder<S: BudgetStore>(store: &mut S, ids: &[Uuid]) -> Result<()> {
        let reordered = apply_order(store.payment_methods(), ids)?;
        store.upsert_payment_methods(reordered)
    }

    fn get<S: BudgetStore>(store: &S, id: Uuid) -> Result<PaymentMethod> {
        store
            .payment_method(id)
            .ok_or_else(|| BudgetError::not_found("Payment method", id))
    }
}
