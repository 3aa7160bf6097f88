//! Pure aggregation over transaction lists: totals, income/expense/profit splits, date
//! and plot filters, and the per-category breakdown behind the dashboard chart.
//!
//! Nothing here touches storage. Callers load records, pick a filter, and hand the
//! result to one of the summing functions; everything is synchronous and reentrant.

use crate::model::{Amount, Category, Transaction, TransactionKind};
use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Income, expense and profit totals over some set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Stats {
    pub income: Amount,
    pub expense: Amount,
    pub profit: Amount,
}

/// Partitions transactions by kind and sums each side; `profit = income - expense`.
/// Empty input yields all zeros.
pub fn stats_for<'a, I>(records: I) -> Stats
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Amount::default();
    let mut expense = Amount::default();
    for transaction in records {
        match transaction.kind {
            TransactionKind::Income => income += transaction.amount,
            TransactionKind::Expense => expense += transaction.amount,
        }
    }
    Stats {
        income,
        expense,
        profit: income - expense,
    }
}

/// Sums the amounts of the given transactions; zero for empty input.
pub fn total<'a, I>(records: I) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    records.into_iter().map(|t| t.amount).sum()
}

/// One slice of the category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Amount,
    pub color: &'static str,
}

/// Groups transactions by category and sums each group's amounts. Zero-total groups are
/// dropped, each slice carries its fixed chart color, and the result is ordered by
/// category, so input ordering never changes the outcome.
pub fn category_breakdown<'a, I>(records: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: BTreeMap<Category, Amount> = BTreeMap::new();
    for transaction in records {
        *totals.entry(transaction.category.clone()).or_default() += transaction.amount;
    }
    totals
        .into_iter()
        .filter(|(_, total)| !total.is_zero())
        .map(|(category, total)| CategoryTotal {
            color: category.color(),
            category,
            total,
        })
        .collect()
}

/// Transactions dated on the given calendar day, per the local interpretation of the
/// stored timestamp.
pub fn on_day(records: &[Transaction], day: NaiveDate) -> impl Iterator<Item = &Transaction> {
    records.iter().filter(move |t| t.date.date_naive() == day)
}

/// Transactions dated in the same calendar month and year as `day`.
pub fn in_month(records: &[Transaction], day: NaiveDate) -> impl Iterator<Item = &Transaction> {
    records
        .iter()
        .filter(move |t| t.date.year() == day.year() && t.date.month() == day.month())
}

/// Transactions dated at or after `boundary`, i.e. inside the current season.
pub fn since(
    records: &[Transaction],
    boundary: DateTime<Local>,
) -> impl Iterator<Item = &Transaction> {
    records.iter().filter(move |t| t.date >= boundary)
}

/// Transactions assigned to the given plot.
pub fn for_plot<'a>(
    records: &'a [Transaction],
    plot_id: &'a str,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    records
        .iter()
        .filter(move |t| t.plot_id.as_deref() == Some(plot_id))
}

/// Transactions in the given category.
pub fn for_category<'a>(
    records: &'a [Transaction],
    category: &'a Category,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    records.iter().filter(move |t| &t.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn transaction(
        id: &str,
        kind: TransactionKind,
        category: Category,
        amount: &str,
        date: (i32, u32, u32),
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            title: format!("{id} title"),
            kind,
            category,
            amount: Amount::from_str(amount).unwrap(),
            date: Local
                .with_ymd_and_hms(date.0, date.1, date.2, 9, 0, 0)
                .unwrap(),
            plot_id: None,
            inventory_item_id: None,
            quantity: None,
            note: None,
        }
    }

    #[test]
    fn test_stats_for() {
        let records = vec![
            transaction(
                "a",
                TransactionKind::Income,
                Category::Crops,
                "100",
                (2024, 6, 1),
            ),
            transaction(
                "b",
                TransactionKind::Expense,
                Category::Seeds,
                "40",
                (2024, 6, 2),
            ),
        ];
        let stats = stats_for(&records);
        assert_eq!(stats.income, Amount::from_str("100").unwrap());
        assert_eq!(stats.expense, Amount::from_str("40").unwrap());
        assert_eq!(stats.profit, Amount::from_str("60").unwrap());
    }

    #[test]
    fn test_stats_for_empty_input_is_zero() {
        let empty: Vec<Transaction> = Vec::new();
        let stats = stats_for(&empty);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_negative_profit() {
        let records = vec![
            transaction(
                "a",
                TransactionKind::Income,
                Category::Crops,
                "100",
                (2024, 6, 1),
            ),
            transaction(
                "b",
                TransactionKind::Expense,
                Category::Labor,
                "250.75",
                (2024, 6, 2),
            ),
        ];
        assert_eq!(
            stats_for(&records).profit,
            Amount::from_str("-150.75").unwrap()
        );
    }

    #[test]
    fn test_total() {
        let records = vec![
            transaction(
                "a",
                TransactionKind::Expense,
                Category::Seeds,
                "10.5",
                (2024, 6, 1),
            ),
            transaction(
                "b",
                TransactionKind::Expense,
                Category::Seeds,
                "4.5",
                (2024, 6, 2),
            ),
        ];
        assert_eq!(total(&records), Amount::from_str("15").unwrap());

        let empty: Vec<Transaction> = Vec::new();
        assert_eq!(total(&empty), Amount::default());
    }

    #[test]
    fn test_category_breakdown_groups_and_colors() {
        let records = vec![
            transaction(
                "a",
                TransactionKind::Expense,
                Category::Seeds,
                "100",
                (2024, 6, 1),
            ),
            transaction(
                "b",
                TransactionKind::Expense,
                Category::Fertilizer,
                "50",
                (2024, 6, 2),
            ),
            transaction(
                "c",
                TransactionKind::Expense,
                Category::Seeds,
                "25",
                (2024, 6, 3),
            ),
        ];
        let breakdown = category_breakdown(&records);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, Category::Seeds);
        assert_eq!(breakdown[0].total, Amount::from_str("125").unwrap());
        assert_eq!(breakdown[0].color, "#4CAF50");
        assert_eq!(breakdown[1].category, Category::Fertilizer);
    }

    #[test]
    fn test_category_breakdown_is_order_independent() {
        let mut records = vec![
            transaction(
                "a",
                TransactionKind::Expense,
                Category::Transport,
                "10",
                (2024, 6, 1),
            ),
            transaction(
                "b",
                TransactionKind::Expense,
                Category::Seeds,
                "20",
                (2024, 6, 2),
            ),
            transaction(
                "c",
                TransactionKind::Expense,
                Category::Custom("Well Repair".to_string()),
                "30",
                (2024, 6, 3),
            ),
        ];
        let forward = category_breakdown(&records);
        records.reverse();
        let backward = category_breakdown(&records);
        assert_eq!(forward, backward);
        // Custom categories sort after the fixed set and use the fallback color.
        assert_eq!(
            forward[2].category,
            Category::Custom("Well Repair".to_string())
        );
        assert_eq!(forward[2].color, crate::model::DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_category_breakdown_drops_zero_totals() {
        let records = vec![transaction(
            "a",
            TransactionKind::Expense,
            Category::Seeds,
            "0",
            (2024, 6, 1),
        )];
        assert!(category_breakdown(&records).is_empty());
    }

    #[test]
    fn test_on_day() {
        let records = vec![
            transaction(
                "a",
                TransactionKind::Expense,
                Category::Seeds,
                "10",
                (2024, 6, 1),
            ),
            transaction(
                "b",
                TransactionKind::Expense,
                Category::Seeds,
                "20",
                (2024, 6, 2),
            ),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let matched: Vec<&Transaction> = on_day(&records, day).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "b");
    }

    #[test]
    fn test_in_month_requires_same_year() {
        let records = vec![
            transaction(
                "a",
                TransactionKind::Expense,
                Category::Seeds,
                "10",
                (2024, 6, 1),
            ),
            transaction(
                "b",
                TransactionKind::Expense,
                Category::Seeds,
                "20",
                (2023, 6, 15),
            ),
        ];
        let day = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let matched: Vec<&Transaction> = in_month(&records, day).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "a");
    }

    #[test]
    fn test_since_excludes_dates_before_the_boundary() {
        let records = vec![
            transaction(
                "before",
                TransactionKind::Expense,
                Category::Seeds,
                "10",
                (2024, 2, 28),
            ),
            transaction(
                "on",
                TransactionKind::Expense,
                Category::Seeds,
                "20",
                (2024, 3, 1),
            ),
            transaction(
                "after",
                TransactionKind::Expense,
                Category::Seeds,
                "30",
                (2024, 4, 10),
            ),
        ];
        let boundary = Local.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let ids: Vec<&str> = since(&records, boundary).map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["on", "after"]);
    }

    #[test]
    fn test_for_plot_and_for_category() {
        let mut a = transaction(
            "a",
            TransactionKind::Expense,
            Category::Seeds,
            "10",
            (2024, 6, 1),
        );
        a.plot_id = Some("plot-1".to_string());
        let b = transaction(
            "b",
            TransactionKind::Income,
            Category::Crops,
            "500",
            (2024, 6, 2),
        );
        let records = vec![a, b];

        let for_plot_ids: Vec<&str> = for_plot(&records, "plot-1")
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(for_plot_ids, vec!["a"]);

        let crops = Category::Crops;
        let for_cat_ids: Vec<&str> = for_category(&records, &crops)
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(for_cat_ids, vec!["b"]);
    }
}
