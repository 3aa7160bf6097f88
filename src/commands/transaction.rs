//! Transaction command handlers.

use crate::args::{AddTransactionArgs, DeleteArgs, ListTransactionArgs, Period};
use crate::commands::{generate_id, Out};
use crate::model::Transaction;
use crate::{summary, Ledger, Result};
use anyhow::ensure;
use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Records a new transaction.
///
/// A unique id with a `txn-` prefix is generated for the record. When the transaction
/// links an inventory item and carries a quantity, the item's stock moves per the
/// ledger's stock policy.
///
/// # Errors
///
/// - Returns an error when the title is empty or the amount is not positive.
/// - Returns an error when a quantity is given without an inventory item id.
pub async fn add_transaction(
    ledger: &Ledger,
    args: AddTransactionArgs,
) -> Result<Out<Transaction>> {
    ensure!(!args.title().trim().is_empty(), "The title must not be empty");
    ensure!(
        args.amount().is_positive(),
        "The amount must be positive, got '{}'",
        args.amount()
    );
    ensure!(
        args.quantity().is_none() || args.inventory_item_id().is_some(),
        "A quantity is only valid together with --inventory-item-id"
    );

    let transaction = Transaction {
        id: generate_id("txn"),
        title: args.title().trim().to_string(),
        kind: args.kind(),
        category: args.category().clone(),
        amount: args.amount(),
        date: resolve_date(args.date()),
        plot_id: args.plot_id().map(str::to_string),
        inventory_item_id: args.inventory_item_id().map(str::to_string),
        quantity: args.quantity(),
        note: args.note().map(str::to_string),
    };
    ledger.save_transaction(transaction.clone()).await;

    let message = format!(
        "Recorded {} '{}' of {} with ID: {}",
        transaction.kind, transaction.title, transaction.amount, transaction.id
    );
    Ok(Out::new(message, transaction))
}

/// Lists transactions, newest first, with income/expense/profit totals for whatever
/// window and filters were requested.
pub async fn list_transactions(
    ledger: &Ledger,
    args: ListTransactionArgs,
) -> Result<Out<Vec<Transaction>>> {
    let all = ledger.transactions().await;
    let today = Local::now().date_naive();

    let mut matched: Vec<Transaction> = match args.period() {
        Period::All => all,
        Period::Today => summary::on_day(&all, today).cloned().collect(),
        Period::Month => summary::in_month(&all, today).cloned().collect(),
        Period::Season => {
            let boundary = ledger.season_start().await;
            summary::since(&all, boundary).cloned().collect()
        }
    };
    if let Some(category) = args.category() {
        matched.retain(|t| &t.category == category);
    }
    if let Some(plot_id) = args.plot_id() {
        matched.retain(|t| t.plot_id.as_deref() == Some(plot_id));
    }

    let stats = summary::stats_for(&matched);
    let mut lines = vec![format!(
        "{} transaction(s) ({}): income ₹{}, expense ₹{}, profit ₹{}",
        matched.len(),
        args.period(),
        stats.income,
        stats.expense,
        stats.profit
    )];
    for t in &matched {
        lines.push(format!(
            "{}  {:<7} {:<20} ₹{:>12}  {}  [{}]",
            t.date.format("%Y-%m-%d"),
            t.kind.to_string(),
            t.category.to_string(),
            t.amount.to_string(),
            t.title,
            t.id
        ));
    }
    Ok(Out::new(lines.join("\n"), matched))
}

/// Deletes a transaction by id. Deleting an absent id is a no-op, and stock moved by a
/// linked transaction stays moved.
pub async fn delete_transaction(ledger: &Ledger, args: DeleteArgs) -> Result<Out<String>> {
    ledger.delete_transaction(args.id()).await;
    let message = format!("Deleted transaction with ID: {}", args.id());
    Ok(Out::new(message, args.id().to_string()))
}

/// The local timestamp to store for a form-supplied calendar date; "now" when the form
/// left the date blank.
fn resolve_date(date: Option<NaiveDate>) -> DateTime<Local> {
    match date.and_then(|d| d.and_hms_opt(0, 0, 0)) {
        Some(naive) => Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(Local::now),
        None => Local::now(),
    }
}
