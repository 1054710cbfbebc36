//! Validated operations over a [`BudgetStore`](crate::storage::BudgetStore).
//!
//! Services hold no state; the store is passed into every call.

pub mod budget_service;
pub mod category_service;
pub mod insight_service;
pub mod payment_method_service;
pub mod transaction_service;

pub use budget_service::BudgetService;
pub use category_service::CategoryService;
pub use insight_service::InsightService;
pub use payment_method_service::PaymentMethodService;
pub use transaction_service::TransactionService;

use std::collections::HashMap;

use pulse_domain::{Identifiable, NamedEntity, Ordered};
use uuid::Uuid;

use crate::errors::{BudgetError, Result};

pub(crate) fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::InvalidInput("name cannot be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Case-insensitive duplicate check among `items`, ignoring `exclude`.
pub(crate) fn ensure_unique_name<T>(
    items: &[T],
    exclude: Option<Uuid>,
    candidate: &str,
    entity: &str,
) -> Result<()>
where
    T: Identifiable + NamedEntity,
{
    let normalized = candidate.trim().to_lowercase();
    let duplicate = items.iter().any(|item| {
        item.name().trim().to_lowercase() == normalized && exclude != Some(item.id())
    });
    if duplicate {
        tracing::warn!(entity, name = candidate.trim(), "rejected duplicate name");
        Err(BudgetError::Conflict(format!(
            "{entity} `{}` already exists",
            candidate.trim()
        )))
    } else {
        Ok(())
    }
}

/// Assigns `order` by position in `ids`, which must name every item exactly once.
pub(crate) fn apply_order<T>(items: Vec<T>, ids: &[Uuid]) -> Result<Vec<T>>
where
    T: Identifiable + Ordered,
{
    if ids.len() != items.len() {
        return Err(BudgetError::InvalidInput(format!(
            "expected {} ids to reorder, got {}",
            items.len(),
            ids.len()
        )));
    }
    let mut by_id: HashMap<Uuid, T> = items.into_iter().map(|item| (item.id(), item)).collect();
    let mut ordered = Vec::with_capacity(ids.len());
    for (position, id) in ids.iter().enumerate() {
        let mut item = by_id
            .remove(id)
            .ok_or_else(|| BudgetError::InvalidInput(format!("unknown or repeated id {id}")))?;
        item.set_order(position as u32);
        ordered.push(item);
    }
    Ok(ordered)
}

/// Next free `order` slot after `items`.
pub(crate) fn next_order<T: Ordered>(items: &[T]) -> u32 {
    items
        .iter()
        .map(|item| item.order() + 1)
        .max()
        .unwrap_or(0)
}
