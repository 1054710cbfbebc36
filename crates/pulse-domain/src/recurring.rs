use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;
use crate::error::DomainError;
use crate::time_interval::{TimeInterval, TimeUnit};
use crate::transaction::TransactionKind;
use crate::validation::is_valid_amount;

const MAX_OCCURRENCES: usize = 1024;

/// A scheduled entry (rent, salary, subscriptions) repeating on a fixed interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringTransaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub category_id: Uuid,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<Uuid>,
    pub interval: TimeInterval,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default = "RecurringTransaction::default_active")]
    pub is_active: bool,
}

impl RecurringTransaction {
    pub fn new(
        kind: TransactionKind,
        category_id: Uuid,
        amount: i64,
        interval: TimeInterval,
        start_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if !is_valid_amount(amount) {
            return Err(DomainError::InvalidAmount(amount.to_string()));
        }
        if interval.every == 0 {
            return Err(DomainError::InvalidInterval("every must be positive".into()));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            category_id,
            amount,
            description: None,
            payment_method_id: None,
            interval,
            start_date,
            end_date: None,
            is_active: true,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn ending_on(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn default_active() -> bool {
        true
    }

    /// Scheduled dates falling inside `[from, until]`, both inclusive.
    /// Paused schedules and empty ranges yield nothing, and a schedule stops at
    /// the first step past the representable calendar.
    pub fn occurrences_between(&self, from: NaiveDate, until: NaiveDate) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        if !self.is_active || until < from || self.interval.every == 0 {
            return dates;
        }
        let last = match self.end_date {
            Some(end) => end.min(until),
            None => until,
        };
        let Some(mut index) = self.first_index_on_or_after(from) else {
            return dates;
        };
        while dates.len() < MAX_OCCURRENCES {
            let Some(candidate) = self.interval.add_to(self.start_date, index) else {
                break;
            };
            if candidate > last {
                break;
            }
            if candidate >= from {
                dates.push(candidate);
            }
            match index.checked_add(1) {
                Some(next) => index = next,
                None => break,
            }
        }
        dates
    }

    pub fn next_occurrence(&self, on_or_after: NaiveDate) -> Option<NaiveDate> {
        if !self.is_active || self.interval.every == 0 {
            return None;
        }
        let index = self.first_index_on_or_after(on_or_after)?;
        let candidate = self.interval.add_to(self.start_date, index)?;
        match self.end_date {
            Some(end) if candidate > end => None,
            _ => Some(candidate),
        }
    }

    /// Index of the first step landing on or after `from`.
    fn first_index_on_or_after(&self, from: NaiveDate) -> Option<i32> {
        if from <= self.start_date {
            return Some(0);
        }
        let every = i64::from(self.interval.every);
        let estimate = match self.interval.unit {
            TimeUnit::Day => (from - self.start_date).num_days() / every,
            TimeUnit::Week => (from - self.start_date).num_days() / (7 * every),
            TimeUnit::Month => months_between(self.start_date, from) / every,
            TimeUnit::Year => months_between(self.start_date, from) / (12 * every),
        };
        let mut index = i32::try_from(estimate).ok()?;
        while index > 0
            && self
                .interval
                .add_to(self.start_date, index - 1)
                .is_some_and(|date| date >= from)
        {
            index -= 1;
        }
        loop {
            if self.interval.add_to(self.start_date, index)? >= from {
                return Some(index);
            }
            index = index.checked_add(1)?;
        }
    }
}

impl Identifiable for RecurringTransaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let start_idx = start.year() as i64 * 12 + start.month0() as i64;
    let end_idx = end.year() as i64 * 12 + end.month0() as i64;
    end_idx - start_idx
}
