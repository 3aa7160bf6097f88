//! The dashboard handler: today/month/season totals plus the season expense chart.

use crate::commands::Out;
use crate::model::TransactionKind;
use crate::summary::{self, CategoryTotal, Stats};
use crate::{Ledger, Result};
use chrono::{DateTime, Local};
use serde::Serialize;

/// The numbers behind the home screen: totals for three reporting windows and the
/// per-category expense breakdown for the current season.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Dashboard {
    pub today: Stats,
    pub month: Stats,
    pub season: Stats,
    pub season_start: DateTime<Local>,
    pub expense_breakdown: Vec<CategoryTotal>,
}

/// Computes the dashboard from the stored transactions and season boundary.
pub async fn dashboard(ledger: &Ledger) -> Result<Out<Dashboard>> {
    let transactions = ledger.transactions().await;
    let season_start = ledger.season_start().await;
    let today = Local::now().date_naive();

    let dashboard = Dashboard {
        today: summary::stats_for(summary::on_day(&transactions, today)),
        month: summary::stats_for(summary::in_month(&transactions, today)),
        season: summary::stats_for(summary::since(&transactions, season_start)),
        season_start,
        expense_breakdown: summary::category_breakdown(
            summary::since(&transactions, season_start)
                .filter(|t| t.kind == TransactionKind::Expense),
        ),
    };

    let mut lines = vec![
        format!(
            "Today:  income ₹{}, expense ₹{}, profit ₹{}",
            dashboard.today.income, dashboard.today.expense, dashboard.today.profit
        ),
        format!(
            "Month:  income ₹{}, expense ₹{}, profit ₹{}",
            dashboard.month.income, dashboard.month.expense, dashboard.month.profit
        ),
        format!(
            "Season: income ₹{}, expense ₹{}, profit ₹{} (since {})",
            dashboard.season.income,
            dashboard.season.expense,
            dashboard.season.profit,
            dashboard.season_start.format("%Y-%m-%d")
        ),
    ];
    if !dashboard.expense_breakdown.is_empty() {
        lines.push("Season expenses by category:".to_string());
        for slice in &dashboard.expense_breakdown {
            lines.push(format!(
                "  {:<20} ₹{:>12}  {}",
                slice.category.to_string(),
                slice.total.to_string(),
                slice.color
            ));
        }
    }
    Ok(Out::new(lines.join("\n"), dashboard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::AddTransactionArgs;
    use crate::commands::add_transaction;
    use crate::model::{Amount, Category};
    use crate::test::TestEnv;
    use chrono::{Datelike, NaiveDate, TimeZone};
    use std::str::FromStr;

    #[tokio::test]
    async fn test_dashboard_windows() {
        let env = TestEnv::new().await;
        let ledger = env.ledger();
        let today = Local::now().date_naive();
        let last_year = NaiveDate::from_ymd_opt(today.year() - 1, 6, 15).unwrap();
        ledger
            .set_season_start(
                Local
                    .with_ymd_and_hms(today.year(), 1, 1, 0, 0, 0)
                    .earliest()
                    .unwrap(),
            )
            .await;

        add_transaction(
            ledger,
            AddTransactionArgs::new(
                "Wheat sale",
                TransactionKind::Income,
                Category::Crops,
                Amount::from_str("5000").unwrap(),
                Some(today),
                None,
                None,
                None,
                None,
            ),
        )
        .await
        .unwrap();
        add_transaction(
            ledger,
            AddTransactionArgs::new(
                "Old diesel",
                TransactionKind::Expense,
                Category::Transport,
                Amount::from_str("300").unwrap(),
                Some(last_year),
                None,
                None,
                None,
                None,
            ),
        )
        .await
        .unwrap();

        let dashboard = dashboard(ledger)
            .await
            .unwrap()
            .structure()
            .unwrap()
            .clone();
        assert_eq!(dashboard.today.income, Amount::from_str("5000").unwrap());
        assert_eq!(dashboard.season.income, Amount::from_str("5000").unwrap());
        // The expense predates the season start and stays out of every window.
        assert_eq!(dashboard.today.expense, Amount::default());
        assert_eq!(dashboard.season.expense, Amount::default());
    }

    #[tokio::test]
    async fn test_breakdown_is_expense_only() {
        let env = TestEnv::new().await;
        let ledger = env.ledger();
        let today = Local::now().date_naive();

        add_transaction(
            ledger,
            AddTransactionArgs::new(
                "Wheat sale",
                TransactionKind::Income,
                Category::Crops,
                Amount::from_str("5000").unwrap(),
                Some(today),
                None,
                None,
                None,
                None,
            ),
        )
        .await
        .unwrap();
        add_transaction(
            ledger,
            AddTransactionArgs::new(
                "Hybrid seed",
                TransactionKind::Expense,
                Category::Seeds,
                Amount::from_str("1200").unwrap(),
                Some(today),
                None,
                None,
                None,
                None,
            ),
        )
        .await
        .unwrap();

        let dashboard = dashboard(ledger)
            .await
            .unwrap()
            .structure()
            .unwrap()
            .clone();
        assert_eq!(dashboard.expense_breakdown.len(), 1);
        assert_eq!(dashboard.expense_breakdown[0].category, Category::Seeds);
        assert_eq!(dashboard.expense_breakdown[0].color, "#4CAF50");
    }

    #[tokio::test]
    async fn test_empty_store_is_all_zeros() {
        let env = TestEnv::new().await;
        let dashboard = dashboard(env.ledger())
            .await
            .unwrap()
            .structure()
            .unwrap()
            .clone();
        assert_eq!(dashboard.today, Stats::default());
        assert_eq!(dashboard.month, Stats::default());
        assert_eq!(dashboard.season, Stats::default());
        assert!(dashboard.expense_breakdown.is_empty());
    }
}
