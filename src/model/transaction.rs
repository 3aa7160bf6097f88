use crate::model::{Amount, Category};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a transaction brings money in or pays it out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionKind);
serde_plain::derive_fromstr_from_deserialize!(TransactionKind);

/// A single income or expense entry.
///
/// The `id` is supplied by the caller and must be unique within the transactions
/// collection. `plot_id` and `inventory_item_id` are weak references: the records they
/// point at may have been deleted, and consumers treat a lookup miss as "unlinked".
/// `quantity` is only meaningful alongside `inventory_item_id`; a linked transaction
/// without a quantity moves no stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: Amount,
    pub date: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_item_id: Option<String>,
    #[serde(
        default,
        with = "super::amount::decimal::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
