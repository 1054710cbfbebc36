//! Domain types for individual income and expense entries.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;
use crate::error::DomainError;
use crate::validation::is_valid_amount;

/// Direction of money flow for a transaction or category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// A single recorded income or expense. Amounts are positive minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub kind: TransactionKind,
    pub category_id: Uuid,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        category_id: Uuid,
        amount: i64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Self, DomainError> {
        if !is_valid_amount(amount) {
            return Err(DomainError::InvalidAmount(amount.to_string()));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            date,
            time,
            kind,
            category_id,
            amount,
            description: None,
            memo: None,
            payment_method_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn expense(category_id: Uuid, amount: i64, date: NaiveDate) -> Result<Self, DomainError> {
        Self::new(
            TransactionKind::Expense,
            category_id,
            amount,
            date,
            NaiveTime::MIN,
        )
    }

    pub fn income(category_id: Uuid, amount: i64, date: NaiveDate) -> Result<Self, DomainError> {
        Self::new(
            TransactionKind::Income,
            category_id,
            amount,
            date,
            NaiveTime::MIN,
        )
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_payment_method(mut self, payment_method_id: Uuid) -> Self {
        self.payment_method_id = Some(payment_method_id);
        self
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = time;
        self
    }

    pub fn occurred_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Signed effect on the balance: income positive, expense negative.
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}
