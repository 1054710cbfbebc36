use pulse_domain::{default_categories, is_valid_amount, Category, DomainError, TransactionKind};
use uuid::Uuid;

use crate::errors::{BudgetError, Result};
use crate::storage::BudgetStore;

use super::{apply_order, ensure_unique_name, next_order, validate_name};

pub struct CategoryService;

impl CategoryService {
    /// Stores a new category at the end of its kind's list.
    pub fn add<S: BudgetStore>(store: &mut S, mut category: Category) -> Result<Uuid> {
        category.name = validate_name(&category.name)?;
        let siblings = Self::list(store, category.kind);
        ensure_unique_name(&siblings, None, &category.name, "Category")?;
        Self::validate_budget(&category)?;
        category.order = next_order(&siblings);
        category.is_default = false;
        let id = category.id;
        tracing::info!(%id, name = %category.name, kind = %category.kind, "adding category");
        store.upsert_category(category)?;
        Ok(id)
    }

    /// Applies `mutator` and saves the result. Identity, kind and the default
    /// flag are not editable.
    pub fn edit<S, F>(store: &mut S, id: Uuid, mutator: F) -> Result<Category>
    where
        S: BudgetStore,
        F: FnOnce(&mut Category),
    {
        let original = Self::get(store, id)?;
        let mut category = original.clone();
        mutator(&mut category);
        category.id = original.id;
        category.kind = original.kind;
        category.is_default = original.is_default;
        category.name = validate_name(&category.name)?;
        ensure_unique_name(
            &Self::list(store, category.kind),
            Some(id),
            &category.name,
            "Category",
        )?;
        Self::validate_budget(&category)?;
        store.upsert_category(category.clone())?;
        tracing::info!(%id, name = %category.name, "edited category");
        Ok(category)
    }

    pub fn remove<S: BudgetStore>(store: &mut S, id: Uuid) -> Result<Category> {
        let category = Self::get(store, id)?;
        if category.is_default {
            tracing::warn!(%id, "refused to remove default category");
            return Err(BudgetError::Conflict(format!(
                "default category `{}` cannot be removed",
                category.name
            )));
        }
        let linked = store.transactions_for_category(id).len();
        if linked > 0 {
            tracing::warn!(%id, linked, "refused to remove category in use");
            return Err(BudgetError::Conflict(format!(
                "category `{}` has {linked} linked transactions",
                category.name
            )));
        }
        if store
            .recurring_transactions()
            .iter()
            .any(|recurring| recurring.category_id == id)
        {
            return Err(BudgetError::Conflict(format!(
                "category `{}` is used by a recurring transaction",
                category.name
            )));
        }
        let removed = store.delete_category(id)?;
        tracing::info!(%id, name = %removed.name, "removed category");
        Ok(removed)
    }

    /// Rewrites the order of every category of `kind` to match `ids`.
    pub fn reorder<S: BudgetStore>(
        store: &mut S,
        kind: TransactionKind,
        ids: &[Uuid],
    ) -> Result<()> {
        let reordered = apply_order(Self::list(store, kind), ids)?;
        store.upsert_categories(reordered)?;
        tracing::debug!(%kind, count = ids.len(), "reordered categories");
        Ok(())
    }

    /// Sets or clears (`None` or `0`) the monthly budget of an expense category.
    pub fn set_budget<S: BudgetStore>(
        store: &mut S,
        id: Uuid,
        budget: Option<i64>,
    ) -> Result<Category> {
        let mut category = Self::get(store, id)?;
        if category.kind != TransactionKind::Expense {
            return Err(BudgetError::InvalidInput(format!(
                "`{}` is an income category and cannot carry a budget",
                category.name
            )));
        }
        category.budget = budget.filter(|amount| *amount != 0);
        Self::validate_budget(&category)?;
        store.upsert_category(category.clone())?;
        tracing::info!(%id, budget = ?category.budget, "set category budget");
        Ok(category)
    }

    /// Inserts the default category set into an empty store. Returns how many
    /// categories were added.
    pub fn seed_defaults<S: BudgetStore>(store: &mut S) -> Result<usize> {
        if !store.categories().is_empty() {
            return Ok(0);
        }
        let defaults = default_categories();
        let count = defaults.len();
        store.upsert_categories(defaults)?;
        tracing::info!(count, "seeded default categories");
        Ok(count)
    }

    pub fn list<S: BudgetStore>(store: &S, kind: TransactionKind) -> Vec<Category> {
        store
            .categories()
            .into_iter()
            .filter(|category| category.kind == kind)
            .collect()
    }

    fn get<S: BudgetStore>(store: &S, id: Uuid) -> Result<Category> {
        store
            .category(id)
            .ok_or_else(|| BudgetError::not_found("Category", id))
    }

    fn validate_budget(category: &Category) -> Result<()> {
        match category.budget {
            Some(amount) if !is_valid_amount(amount) => {
                Err(DomainError::InvalidAmount(amount.to_string()).into())
            }
            Some(_) if category.kind != TransactionKind::Expense => Err(
                BudgetError::InvalidInput("income categories cannot carry a budget".into()),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use pulse_domain::Transaction;

    fn seeded() -> MemoryStore {
        let mut store = MemoryStore::new();
        CategoryService::seed_defaults(&mut store).unwrap();
        store
    }

    #[test]
    fn seed_defaults_runs_once() {
        let mut store = seeded();
        let seeded = store.categories().len();
        assert!(seeded > 0);
        assert_eq!(CategoryService::seed_defaults(&mut store).unwrap(), 0);
        assert_eq!(store.categories().len(), seeded);
    }

    #[test]
    fn add_appends_and_rejects_duplicates_per_kind() {
        let mut store = seeded();
        let expense_count = CategoryService::list(&store, TransactionKind::Expense).len();
        let id = CategoryService::add(&mut store, Category::expense("  Pets ")).unwrap();
        let pets = store.category(id).unwrap();
        assert_eq!(pets.name, "Pets");
        assert_eq!(pets.order, expense_count as u32);

        let err = CategoryService::add(&mut store, Category::expense("pets")).unwrap_err();
        assert!(matches!(err, BudgetError::Conflict(_)));
        // Same name under the other kind is fine.
        assert!(CategoryService::add(&mut store, Category::income("Pets")).is_ok());
        assert!(CategoryService::add(&mut store, Category::expense("   ")).is_err());
    }

    #[test]
    fn remove_guards_defaults_and_linked_categories() {
        let mut store = seeded();
        let default = CategoryService::list(&store, TransactionKind::Expense)[0].clone();
        assert!(matches!(
            CategoryService::remove(&mut store, default.id),
            Err(BudgetError::Conflict(_))
        ));

        let id = CategoryService::add(&mut store, Category::expense("Pets")).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let txn = Transaction::expense(id, 3_000, date).unwrap();
        let txn_id = txn.id;
        store.insert_transaction(txn).unwrap();
        assert!(CategoryService::remove(&mut store, id).is_err());

        store.delete_transaction(txn_id).unwrap();
        assert_eq!(CategoryService::remove(&mut store, id).unwrap().name, "Pets");
    }

    #[test]
    fn edit_keeps_identity_and_checks_names() {
        let mut store = seeded();
        let id = CategoryService::add(&mut store, Category::expense("Pets")).unwrap();
        let edited = CategoryService::edit(&mut store, id, |category| {
            category.name = "Animals".into();
            category.kind = TransactionKind::Income;
            category.is_default = true;
        })
        .unwrap();
        assert_eq!(edited.kind, TransactionKind::Expense);
        assert!(!edited.is_default);

        let err = CategoryService::edit(&mut store, id, |category| category.name = "food".into())
            .unwrap_err();
        assert!(matches!(err, BudgetError::Conflict(_)));
    }

    #[test]
    fn reorder_requires_every_id_once() {
        let mut store = seeded();
        let mut ids: Vec<Uuid> = CategoryService::list(&store, TransactionKind::Income)
            .iter()
            .map(|c| c.id)
            .collect();
        ids.reverse();
        CategoryService::reorder(&mut store, TransactionKind::Income, &ids).unwrap();
        let reordered: Vec<Uuid> = CategoryService::list(&store, TransactionKind::Income)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(reordered, ids);

        let partial = &ids[1..];
        assert!(CategoryService::reorder(&mut store, TransactionKind::Income, partial).is_err());
        let mut repeated = ids.clone();
        repeated[0] = repeated[1];
        assert!(CategoryService::reorder(&mut store, TransactionKind::Income, &repeated).is_err());
    }

    #[test]
    fn set_budget_only_for_expense_categories() {
        let mut store = seeded();
        let food = CategoryService::list(&store, TransactionKind::Expense)[0].clone();
        let salary = CategoryService::list(&store, TransactionKind::Income)[0].clone();

        let updated = CategoryService::set_budget(&mut store, food.id, Some(300_000)).unwrap();
        assert_eq!(updated.budget, Some(300_000));
        let cleared = CategoryService::set_budget(&mut store, food.id, Some(0)).unwrap();
        assert_eq!(cleared.budget, None);
        assert!(CategoryService::set_budget(&mut store, food.id, Some(-5)).is_err());
        assert!(CategoryService::set_budget(&mut store, salary.id, Some(1_000)).is_err());
    }
}
