//! Domain types representing spending and income categories.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, NamedEntity, Ordered};
use crate::transaction::TransactionKind;

/// Groups transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: TransactionKind,
    pub icon: String,
    pub color: String,
    /// Monthly budget in minor units; only meaningful for expense categories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<i64>,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: TransactionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            icon: String::from("tag"),
            color: String::from("#9E9E9E"),
            budget: None,
            order: 0,
            is_default: false,
        }
    }

    pub fn expense(name: impl Into<String>) -> Self {
        Self::new(name, TransactionKind::Expense)
    }

    pub fn income(name: impl Into<String>) -> Self {
        Self::new(name, TransactionKind::Income)
    }

    pub fn with_icon(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    pub fn with_budget(mut self, budget: i64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn has_budget(&self) -> bool {
        matches!(self.budget, Some(amount) if amount > 0)
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Ordered for Category {
    fn order(&self) -> u32 {
        self.order
    }

    fn set_order(&mut self, order: u32) {
        self.order = order;
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

const DEFAULT_EXPENSE: &[(&str, &str, &str)] = &[
    ("Food", "utensils", "#FF6B6B"),
    ("Cafe", "coffee", "#C08457"),
    ("Transport", "bus", "#4D96FF"),
    ("Shopping", "bag", "#FFB347"),
    ("Living", "home", "#6BCB77"),
    ("Health", "heart", "#E84393"),
    ("Culture", "film", "#9B59B6"),
    ("Other", "dots", "#9E9E9E"),
];

const DEFAULT_INCOME: &[(&str, &str, &str)] = &[
    ("Salary", "wallet", "#2ECC71"),
    ("Bonus", "gift", "#F1C40F"),
    ("Side income", "briefcase", "#1ABC9C"),
    ("Other income", "dots", "#95A5A6"),
];

/// Builds the seed category set shown on first launch.
pub fn default_categories() -> Vec<Category> {
    let expense = DEFAULT_EXPENSE
        .iter()
        .enumerate()
        .map(|(idx, (name, icon, color))| (idx, TransactionKind::Expense, name, icon, color));
    let income = DEFAULT_INCOME
        .iter()
        .enumerate()
        .map(|(idx, (name, icon, color))| (idx, TransactionKind::Income, name, icon, color));
    expense
        .chain(income)
        .map(|(idx, kind, name, icon, color)| {
            let mut category = Category::new(*name, kind)
                .with_icon(*icon, *color)
                .with_order(idx as u32);
            category.is_default = true;
            category
        })
        .collect()
}
