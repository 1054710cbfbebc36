use chrono::NaiveDate;
use pulse_domain::{RecurringTransaction, TransactionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One projected occurrence of a recurring transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpcomingItem {
    pub recurring_id: Uuid,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_id: Uuid,
    pub amount: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpcomingSummary {
    pub items: Vec<UpcomingItem>,
    pub income_total: i64,
    pub expense_total: i64,
    /// `income_total - expense_total`.
    pub net_impact: i64,
}

impl UpcomingSummary {
    fn from_items(mut items: Vec<UpcomingItem>) -> Self {
        items.sort_by(|a, b| a.date.cmp(&b.date).then(b.amount.cmp(&a.amount)));
        let mut summary = UpcomingSummary::default();
        for item in &items {
            match item.kind {
                TransactionKind::Income => summary.income_total += item.amount,
                TransactionKind::Expense => summary.expense_total += item.amount,
            }
        }
        summary.net_impact = summary.income_total - summary.expense_total;
        summary.items = items;
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Projects every active schedule into `[from, until]`, both inclusive.
pub fn project_upcoming(
    recurring: &[RecurringTransaction],
    from: NaiveDate,
    until: NaiveDate,
) -> UpcomingSummary {
    let items = recurring
        .iter()
        .flat_map(|schedule| {
            schedule
                .occurrences_between(from, until)
                .into_iter()
                .map(move |date| UpcomingItem {
                    recurring_id: schedule.id,
                    date,
                    kind: schedule.kind,
                    category_id: schedule.category_id,
                    amount: schedule.amount,
                    description: schedule.description.clone(),
                })
        })
        .collect();
    UpcomingSummary::from_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_domain::{TimeInterval, TimeUnit};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn schedule(kind: TransactionKind, amount: i64, start: NaiveDate) -> RecurringTransaction {
        RecurringTransaction::new(kind, Uuid::new_v4(), amount, TimeInterval::monthly(), start)
            .unwrap()
    }

    #[test]
    fn sums_income_and_expense_separately() {
        let recurring = vec![
            schedule(TransactionKind::Income, 3_000_000, date(2025, 1, 25)),
            schedule(TransactionKind::Expense, 550_000, date(2025, 1, 28)),
            schedule(TransactionKind::Expense, 17_000, date(2025, 1, 3)),
        ];
        let summary = project_upcoming(&recurring, date(2025, 7, 10), date(2025, 7, 31));
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.income_total, 3_000_000);
        assert_eq!(summary.expense_total, 550_000);
        assert_eq!(summary.net_impact, 2_450_000);
        assert_eq!(summary.items[0].date, date(2025, 7, 25));
    }

    #[test]
    fn paused_schedules_are_skipped() {
        let mut paused = schedule(TransactionKind::Expense, 9_900, date(2025, 1, 15));
        paused.is_active = false;
        let summary = project_upcoming(&[paused], date(2025, 7, 1), date(2025, 7, 31));
        assert!(summary.is_empty());
        assert_eq!(summary.net_impact, 0);
    }

    #[test]
    fn huge_intervals_project_at_most_their_start() {
        let interval = TimeInterval::new(200_000_000, TimeUnit::Day).unwrap();
        let far = RecurringTransaction::new(
            TransactionKind::Expense,
            Uuid::new_v4(),
            5_000,
            interval,
            date(2025, 7, 12),
        )
        .unwrap();
        let summary = project_upcoming(&[far], date(2025, 7, 1), date(2025, 7, 31));
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.expense_total, 5_000);
    }
}
