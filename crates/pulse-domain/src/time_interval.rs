use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub fn new(every: u32, unit: TimeUnit) -> Result<Self, DomainError> {
        if every == 0 {
            return Err(DomainError::InvalidInterval(
                "interval must repeat at least every 1 unit".into(),
            ));
        }
        Ok(Self { every, unit })
    }

    pub fn monthly() -> Self {
        Self {
            every: 1,
            unit: TimeUnit::Month,
        }
    }

    pub fn weekly() -> Self {
        Self {
            every: 1,
            unit: TimeUnit::Week,
        }
    }

    pub fn next_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.add_to(from, 1)
    }

    pub fn previous_date(&self, from: NaiveDate) -> Option<NaiveDate> {
        self.add_to(from, -1)
    }

    /// Moves `steps` intervals away from `from`, or `None` once the result
    /// leaves the representable calendar. Month and year steps are computed in
    /// one jump from the anchor so a day-31 schedule lands on the last day of
    /// short months without drifting afterwards.
    pub fn add_to(&self, from: NaiveDate, steps: i32) -> Option<NaiveDate> {
        let span = i64::from(self.every).checked_mul(i64::from(steps))?;
        match self.unit {
            TimeUnit::Day => from.checked_add_signed(Duration::try_days(span)?),
            TimeUnit::Week => from.checked_add_signed(Duration::try_weeks(span)?),
            TimeUnit::Month => checked_shift_month(from, span),
            TimeUnit::Year => checked_shift_month(from, span.checked_mul(12)?),
        }
    }

    pub fn label(&self) -> String {
        match (self.every, &self.unit) {
            (1, TimeUnit::Day) => "Daily".into(),
            (1, TimeUnit::Week) => "Weekly".into(),
            (1, TimeUnit::Month) => "Monthly".into(),
            (1, TimeUnit::Year) => "Yearly".into(),
            (n, unit) => format!("Every {} {:?}s", n, unit),
        }
    }
}

/// Shifts a date by whole months, clamping the day to the target month length.
/// Falls back to `date` when the target is out of range.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    checked_shift_month(date, i64::from(months)).unwrap_or(date)
}

pub fn checked_shift_month(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = (i64::from(date.year()) * 12 + i64::from(date.month0())).checked_add(months)?;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        return 31;
    }
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_steps_clamp_without_drift() {
        let interval = TimeInterval::monthly();
        let start = date(2025, 1, 31);
        assert_eq!(interval.add_to(start, 1), Some(date(2025, 2, 28)));
        assert_eq!(interval.add_to(start, 2), Some(date(2025, 3, 31)));
        assert_eq!(interval.add_to(start, -2), Some(date(2024, 11, 30)));
    }

    #[test]
    fn leap_years_are_respected() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 12), 31);
        let yearly = TimeInterval::new(1, TimeUnit::Year).unwrap();
        assert_eq!(yearly.next_date(date(2024, 2, 29)), Some(date(2025, 2, 28)));
    }

    #[test]
    fn steps_past_the_calendar_are_none() {
        let start = date(2025, 7, 1);
        let days = TimeInterval::new(200_000_000, TimeUnit::Day).unwrap();
        assert_eq!(days.add_to(start, 1), None);
        assert_eq!(days.add_to(start, 0), Some(start));
        let years = TimeInterval::new(u32::MAX, TimeUnit::Year).unwrap();
        assert_eq!(years.add_to(start, i32::MAX), None);
        assert_eq!(years.previous_date(start), None);
        assert_eq!(shift_month(start, i32::MAX), start);
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(TimeInterval::new(0, TimeUnit::Day).is_err());
        assert_eq!(
            TimeInterval::new(2, TimeUnit::Week).unwrap().label(),
            "Every 2 Weeks"
        );
    }
}
