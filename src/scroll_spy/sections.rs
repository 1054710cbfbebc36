use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use pulse_domain::{Transaction, TransactionKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Month,
    Date,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionSummary {
    pub income: i64,
    pub expense: i64,
}

impl SectionSummary {
    fn add(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Income => self.income += txn.amount,
            TransactionKind::Expense => self.expense += txn.amount,
        }
    }
}

/// A sticky-header group in a scrolling transaction list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrollSpySection {
    pub id: String,
    pub kind: SectionKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SectionSummary>,
}

impl ScrollSpySection {
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            id: format!("month-{year:04}-{month:02}"),
            kind: SectionKind::Month,
            label: format!("{year:04}-{month:02}"),
            summary: None,
        }
    }

    pub fn date(date: NaiveDate) -> Self {
        Self {
            id: format!("date-{}", date.format("%Y-%m-%d")),
            kind: SectionKind::Date,
            label: date.format("%Y-%m-%d (%a)").to_string(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: SectionSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}

/// Groups transactions into month and date sections, newest first, each
/// month header followed by its dates.
pub fn group_transactions(transactions: &[Transaction]) -> Vec<ScrollSpySection> {
    let mut months: BTreeMap<(i32, u32), (SectionSummary, BTreeMap<NaiveDate, SectionSummary>)> =
        BTreeMap::new();
    for txn in transactions {
        let (month_summary, dates) = months
            .entry((txn.date.year(), txn.date.month()))
            .or_default();
        month_summary.add(txn);
        dates.entry(txn.date).or_default().add(txn);
    }

    let mut sections = Vec::new();
    for ((year, month), (summary, dates)) in months.into_iter().rev() {
        sections.push(ScrollSpySection::month(year, month).with_summary(summary));
        for (date, day_summary) in dates.into_iter().rev() {
            sections.push(ScrollSpySection::date(date).with_summary(day_summary));
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn groups_newest_first_with_summaries() {
        let category = Uuid::new_v4();
        let transactions = vec![
            Transaction::expense(category, 5_000, date(2025, 6, 30)).unwrap(),
            Transaction::expense(category, 12_000, date(2025, 7, 2)).unwrap(),
            Transaction::income(category, 100_000, date(2025, 7, 2)).unwrap(),
            Transaction::expense(category, 3_000, date(2025, 7, 1)).unwrap(),
        ];
        let sections = group_transactions(&transactions);
        let ids: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "month-2025-07",
                "date-2025-07-02",
                "date-2025-07-01",
                "month-2025-06",
                "date-2025-06-30",
            ]
        );
        assert_eq!(
            sections[0].summary,
            Some(SectionSummary {
                income: 100_000,
                expense: 15_000
            })
        );
        assert_eq!(sections[1].kind, SectionKind::Date);
        assert_eq!(sections[1].label, "2025-07-02 (Wed)");
    }
}
