//! Plot command handlers.

use crate::args::{AddPlotArgs, DeleteArgs, ShowPlotArgs};
use crate::commands::{generate_id, Out};
use crate::model::Plot;
use crate::summary::{self, Stats};
use crate::{Ledger, Result};
use anyhow::{bail, ensure};
use serde::Serialize;

/// Adds a plot of farmland with a generated `plot-` id.
pub async fn add_plot(ledger: &Ledger, args: AddPlotArgs) -> Result<Out<Plot>> {
    ensure!(!args.name().trim().is_empty(), "The plot name must not be empty");
    ensure!(
        args.area() > rust_decimal::Decimal::ZERO,
        "The plot area must be positive, got '{}'",
        args.area()
    );

    let plot = Plot {
        id: generate_id("plot"),
        name: args.name().trim().to_string(),
        area: args.area(),
        crop_type: args.crop_type().trim().to_string(),
    };
    ledger.save_plot(plot.clone()).await;

    let message = format!(
        "Added plot '{}' ({} acres of {}) with ID: {}",
        plot.name, plot.area, plot.crop_type, plot.id
    );
    Ok(Out::new(message, plot))
}

/// Lists all plots.
pub async fn list_plots(ledger: &Ledger) -> Result<Out<Vec<Plot>>> {
    let plots = ledger.plots().await;
    let mut lines = vec![format!("{} plot(s)", plots.len())];
    for plot in &plots {
        lines.push(format!(
            "{:<20} {:>8} acres  {:<12} [{}]",
            plot.name, plot.area, plot.crop_type, plot.id
        ));
    }
    Ok(Out::new(lines.join("\n"), plots))
}

/// A plot together with its income, expense and profit totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlotReport {
    pub plot: Plot,
    pub stats: Stats,
}

/// Shows one plot with totals computed over its assigned transactions.
///
/// # Errors
///
/// Returns an error when no plot has the given id.
pub async fn show_plot(ledger: &Ledger, args: ShowPlotArgs) -> Result<Out<PlotReport>> {
    let Some(plot) = ledger.plot(args.id()).await else {
        bail!("No plot found with ID: {}", args.id());
    };
    let transactions = ledger.transactions().await;
    let stats = summary::stats_for(summary::for_plot(&transactions, &plot.id));

    let message = format!(
        "{} ({} acres, {}): income ₹{}, expense ₹{}, profit ₹{}",
        plot.name, plot.area, plot.crop_type, stats.income, stats.expense, stats.profit
    );
    Ok(Out::new(message, PlotReport { plot, stats }))
}

/// Deletes a plot by id. Transactions assigned to the plot are kept and simply point at
/// an id that no longer resolves.
pub async fn delete_plot(ledger: &Ledger, args: DeleteArgs) -> Result<Out<String>> {
    ledger.delete_plot(args.id()).await;
    let message = format!(
        "Deleted plot with ID: {}. Its transactions are kept.",
        args.id()
    );
    Ok(Out::new(message, args.id().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::AddTransactionArgs;
    use crate::commands::add_transaction;
    use crate::model::{Amount, Category, TransactionKind};
    use crate::test::TestEnv;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_add_and_list() {
        let env = TestEnv::new().await;
        let ledger = env.ledger();

        let out = add_plot(ledger, AddPlotArgs::new("North Field", Decimal::from(3), "Wheat"))
            .await
            .unwrap();
        let added = out.structure().unwrap().clone();
        assert!(added.id.starts_with("plot-"));

        let listed = list_plots(ledger).await.unwrap();
        assert_eq!(listed.structure().unwrap().as_slice(), &[added]);
    }

    #[tokio::test]
    async fn test_add_rejects_zero_area() {
        let env = TestEnv::new().await;
        let args = AddPlotArgs::new("North Field", Decimal::ZERO, "Wheat");
        let result = add_plot(env.ledger(), args).await;
        assert!(result.unwrap_err().to_string().contains("positive"));
    }

    #[tokio::test]
    async fn test_show_totals_only_assigned_transactions() {
        let env = TestEnv::new().await;
        let ledger = env.ledger();
        let plot = add_plot(ledger, AddPlotArgs::new("North Field", Decimal::from(3), "Wheat"))
            .await
            .unwrap()
            .structure()
            .unwrap()
            .clone();

        add_transaction(
            ledger,
            AddTransactionArgs::new(
                "Wheat sale",
                TransactionKind::Income,
                Category::Crops,
                Amount::from_str("5000").unwrap(),
                None,
                Some(plot.id.clone()),
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
                "Unassigned",
                TransactionKind::Expense,
                Category::Misc,
                Amount::from_str("999").unwrap(),
                None,
                None,
                None,
                None,
                None,
            ),
        )
        .await
        .unwrap();

        let report = show_plot(ledger, ShowPlotArgs::new(&plot.id))
            .await
            .unwrap()
            .structure()
            .unwrap()
            .clone();
        assert_eq!(report.stats.income, Amount::from_str("5000").unwrap());
        assert_eq!(report.stats.expense, Amount::default());
    }

    #[tokio::test]
    async fn test_show_unknown_plot_fails() {
        let env = TestEnv::new().await;
        let result = show_plot(env.ledger(), ShowPlotArgs::new("plot-nope")).await;
        assert!(result.unwrap_err().to_string().contains("plot-nope"));
    }

    #[tokio::test]
    async fn test_delete_keeps_transactions() {
        let env = TestEnv::new().await;
        let ledger = env.ledger();
        let plot = add_plot(ledger, AddPlotArgs::new("South Field", Decimal::from(2), "Rice"))
            .await
            .unwrap()
            .structure()
            .unwrap()
            .clone();
        add_transaction(
            ledger,
            AddTransactionArgs::new(
                "Rice seedlings",
                TransactionKind::Expense,
                Category::Seeds,
                Amount::from_str("700").unwrap(),
                None,
                Some(plot.id.clone()),
                None,
                None,
                None,
            ),
        )
        .await
        .unwrap();

        delete_plot(ledger, DeleteArgs::new(&plot.id)).await.unwrap();

        assert!(ledger.plot(&plot.id).await.is_none());
        let transactions = ledger.transactions().await;
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].plot_id.as_deref(), Some(plot.id.as_str()));
    }
}
