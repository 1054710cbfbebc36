//! Pay-day anchored budget periods.
//!
//! A period runs from a payday (00:00:00) to the day before the next payday
//! (23:59:59). Paydays past the end of a short month fall on that month's
//! last day, so every calendar date belongs to exactly one period.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use pulse_domain::{days_in_month, shift_month};
use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};

/// Day of month the budget restarts on. Accepts 1–31 regardless of month length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u32", into = "u32")]
pub struct Payday(u32);

impl Payday {
    pub fn new(day: u32) -> Result<Self> {
        if (1..=31).contains(&day) {
            Ok(Self(day))
        } else {
            Err(BudgetError::InvalidInput(format!(
                "payday must be between 1 and 31, got {day}"
            )))
        }
    }

    pub fn day(&self) -> u32 {
        self.0
    }

    /// The payday as it falls in the given month, clamped to the month's last day.
    pub fn in_month(&self, year: i32, month: u32) -> NaiveDate {
        let day = self.0.min(days_in_month(year, month));
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for Payday {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for Payday {
    type Error = BudgetError;

    fn try_from(value: u32) -> Result<Self> {
        Payday::new(value)
    }
}

impl From<Payday> for u32 {
    fn from(value: Payday) -> Self {
        value.0
    }
}

impl fmt::Display for Payday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open calendar window `[start, end)` used for store range queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end <= start {
            return Err(BudgetError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// The active budget window for a payday. Derived on every query, never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub payday: Payday,
}

impl BudgetPeriod {
    /// Resolves the period containing `reference`.
    pub fn resolve(reference: NaiveDate, payday: Payday) -> Self {
        let this_month = payday.in_month(reference.year(), reference.month());
        let start_date = if reference >= this_month {
            this_month
        } else {
            let previous = shift_month(first_of_month(reference), -1);
            payday.in_month(previous.year(), previous.month())
        };
        let following = shift_month(first_of_month(start_date), 1);
        let next_start = payday.in_month(following.year(), following.month());
        Self {
            start: start_date.and_time(NaiveTime::MIN),
            end: day_before(next_start).and_time(end_of_day()),
            payday,
        }
    }

    pub fn resolve_at(reference: NaiveDateTime, payday: Payday) -> Self {
        Self::resolve(reference.date(), payday)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    pub fn previous(&self) -> Self {
        Self::resolve(day_before(self.start_date()), self.payday)
    }

    pub fn next(&self) -> Self {
        Self::resolve(day_after(self.end_date()), self.payday)
    }

    pub fn total_days(&self) -> u32 {
        ((self.end_date() - self.start_date()).num_days() + 1) as u32
    }

    /// Days left including `reference` itself; zero once the period is over.
    pub fn remaining_days(&self, reference: NaiveDate) -> u32 {
        if reference > self.end_date() {
            0
        } else if reference < self.start_date() {
            self.total_days()
        } else {
            ((self.end_date() - reference).num_days() + 1) as u32
        }
    }

    pub fn date_window(&self) -> DateWindow {
        DateWindow {
            start: self.start_date(),
            end: day_after(self.end_date()),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ~ {}",
            self.start_date().format("%Y-%m-%d"),
            self.end_date().format("%Y-%m-%d")
        )
    }
}

/// Resolves the budget period for a raw payday value.
pub fn get_budget_period(reference: NaiveDate, payday: u32) -> Result<BudgetPeriod> {
    Ok(BudgetPeriod::resolve(reference, Payday::new(payday)?))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn day_before(date: NaiveDate) -> NaiveDate {
    date.pred_opt().unwrap_or(date)
}

fn day_after(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}
