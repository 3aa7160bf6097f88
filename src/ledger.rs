//! The record store: durable collections of transactions, plots and inventory items,
//! the inventory stock synchronizer, and the season start date.
//!
//! Every mutation is a whole-collection read-modify-write against a single storage key.
//! That is the simplest correct strategy at this data scale (hundreds to low thousands
//! of records), and it means this layer adds no locking: two mutations issued against
//! the same key without awaiting the first can lose a write, last read-modify-write
//! wins. Call sites await one operation before starting the next.
//!
//! Storage failures never surface to callers. Reads degrade to empty collections and
//! writes are logged and dropped, leaving the previously stored value intact.

use crate::model::{InventoryItem, Plot, Transaction, TransactionKind};
use crate::storage::Storage;
use chrono::{DateTime, Datelike, Local, TimeZone};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key for the transactions collection.
pub const TRANSACTIONS_KEY: &str = "transactions_v1";

/// Storage key for the plots collection.
pub const PLOTS_KEY: &str = "plots_v1";

/// Storage key for the inventory collection.
pub const INVENTORY_KEY: &str = "inventory_v1";

/// Storage key for the season start date.
pub const SEASON_START_KEY: &str = "season_start_v1";

/// A stored record addressable by its caller-generated id.
pub trait Record: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> &str;
}

impl Record for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Plot {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for InventoryItem {
    fn id(&self) -> &str {
        &self.id
    }
}

/// How a linked transaction moves the stock of the inventory item it references.
///
/// The two readings of an expense that carries a quantity are at odds: buying 10 bags of
/// urea is an expense that adds stock, while spreading 10 bags on a field is an expense
/// that removes it. The entry forms do not distinguish the two cases, so the rule is a
/// ledger-wide policy rather than a hardcoded sign.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockPolicy {
    /// An expense adds the linked quantity to stock and an income removes it. This
    /// treats every expense link as a purchase and is the historical behavior, even for
    /// expense categories that describe consumption.
    #[default]
    AcquireOnExpense,
    /// An expense removes the linked quantity from stock and an income adds it, for
    /// ledgers where linked quantities record supplies being used up rather than bought.
    ConsumeOnExpense,
}

serde_plain::derive_display_from_serialize!(StockPolicy);
serde_plain::derive_fromstr_from_deserialize!(StockPolicy);

impl StockPolicy {
    /// The signed stock delta for a linked transaction of `kind` carrying `quantity`.
    pub fn delta(&self, kind: TransactionKind, quantity: Decimal) -> Decimal {
        match (self, kind) {
            (StockPolicy::AcquireOnExpense, TransactionKind::Expense)
            | (StockPolicy::ConsumeOnExpense, TransactionKind::Income) => quantity,
            _ => -quantity,
        }
    }
}

/// The ledger: typed access to the three record collections and the season setting,
/// over an injected [`Storage`] backend.
#[derive(Clone)]
pub struct Ledger {
    storage: Arc<dyn Storage>,
    policy: StockPolicy,
}

impl Ledger {
    /// Creates a ledger over `storage` with the default [`StockPolicy`].
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
            policy: StockPolicy::default(),
        }
    }

    /// Replaces the stock policy used by the inventory synchronizer.
    pub fn with_policy(mut self, policy: StockPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    // Generic collection operations ------------------------------------------------

    /// Loads a whole collection. An absent key, a storage error, or unparseable data
    /// all degrade to an empty list.
    async fn list<R: Record>(&self, key: &str) -> Vec<R> {
        let raw = match self.storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read '{key}': {e:#}");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!("Ignoring unreadable data under '{key}': {e:#}");
                Vec::new()
            }
        }
    }

    /// Writes a whole collection back to its key. A failed write is logged and dropped,
    /// so the previously stored value remains in place.
    async fn persist<R: Record>(&self, key: &str, records: &[R]) {
        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize '{key}': {e:#}");
                return;
            }
        };
        if let Err(e) = self.storage.set(key, &raw).await {
            warn!("Failed to write '{key}': {e:#}");
        }
    }

    /// Replaces the record with a matching id in place (position preserved), or
    /// prepends the record when the id is new. Returns true when the record was newly
    /// inserted.
    async fn upsert<R: Record>(&self, key: &str, record: R) -> bool {
        let mut records = self.list::<R>(key).await;
        let inserted = match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                *existing = record;
                false
            }
            None => {
                records.insert(0, record);
                true
            }
        };
        self.persist(key, &records).await;
        inserted
    }

    /// Removes the record with a matching id. An absent id is a no-op.
    async fn remove<R: Record>(&self, key: &str, id: &str) {
        let mut records = self.list::<R>(key).await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            debug!("No record '{id}' under '{key}' to remove");
        }
        self.persist(key, &records).await;
    }

    // Transactions ------------------------------------------------------------------

    /// All transactions, newest first.
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.list(TRANSACTIONS_KEY).await
    }

    /// Saves a transaction. When the save inserts a *new* id and the transaction links
    /// an inventory item with a quantity, the item's stock is adjusted per the
    /// [`StockPolicy`]. Replacing an existing transaction never moves stock, and
    /// neither does deletion — an earlier adjustment is not reversed when the
    /// transaction that caused it is edited or removed.
    pub async fn save_transaction(&self, transaction: Transaction) {
        let inserted = self.upsert(TRANSACTIONS_KEY, transaction.clone()).await;
        if inserted {
            self.sync_inventory(&transaction).await;
        }
    }

    /// Deletes a transaction by id. Idempotent; no stock reversal.
    pub async fn delete_transaction(&self, id: &str) {
        self.remove::<Transaction>(TRANSACTIONS_KEY, id).await;
    }

    /// Applies the stock movement implied by a linked transaction. Does nothing when
    /// the transaction carries no inventory link or no quantity, or when the linked
    /// item no longer exists.
    async fn sync_inventory(&self, transaction: &Transaction) {
        let (Some(item_id), Some(quantity)) = (
            transaction.inventory_item_id.as_deref(),
            transaction.quantity,
        ) else {
            return;
        };
        let delta = self.policy.delta(transaction.kind, quantity);
        debug!(
            "Transaction '{}' moves stock of '{item_id}' by {delta}",
            transaction.id
        );
        self.adjust_inventory(item_id, delta).await;
    }

    // Plots -------------------------------------------------------------------------

    /// All plots, newest first.
    pub async fn plots(&self) -> Vec<Plot> {
        self.list(PLOTS_KEY).await
    }

    /// Looks up a single plot. A miss means the id is dangling or was never assigned.
    pub async fn plot(&self, id: &str) -> Option<Plot> {
        self.plots().await.into_iter().find(|p| p.id == id)
    }

    /// Saves a plot, replacing any existing record with the same id.
    pub async fn save_plot(&self, plot: Plot) {
        self.upsert(PLOTS_KEY, plot).await;
    }

    /// Deletes a plot by id. Transactions referencing the plot are kept and are left
    /// with a dangling `plot_id`.
    pub async fn delete_plot(&self, id: &str) {
        self.remove::<Plot>(PLOTS_KEY, id).await;
    }

    // Inventory ---------------------------------------------------------------------

    /// All inventory items, newest first.
    pub async fn inventory(&self) -> Vec<InventoryItem> {
        self.list(INVENTORY_KEY).await
    }

    /// Looks up a single inventory item by id.
    pub async fn inventory_item(&self, id: &str) -> Option<InventoryItem> {
        self.inventory().await.into_iter().find(|i| i.id == id)
    }

    /// Saves an inventory item, replacing any existing record with the same id.
    pub async fn save_inventory_item(&self, item: InventoryItem) {
        self.upsert(INVENTORY_KEY, item).await;
    }

    /// Deletes an inventory item by id. Transactions referencing the item are kept and
    /// are left with a dangling `inventory_item_id`.
    pub async fn delete_inventory_item(&self, id: &str) {
        self.remove::<InventoryItem>(INVENTORY_KEY, id).await;
    }

    /// Adds `delta` (which may be negative) to the stored quantity of the item with
    /// `id`. A lookup miss is a no-op. Stock is allowed to go negative.
    pub async fn adjust_inventory(&self, id: &str, delta: Decimal) {
        let mut items = self.inventory().await;
        match items.iter_mut().find(|i| i.id == id) {
            Some(item) => item.quantity += delta,
            None => {
                debug!("No inventory item '{id}' to adjust");
                return;
            }
        }
        self.persist(INVENTORY_KEY, &items).await;
    }

    // Season ------------------------------------------------------------------------

    /// The start of the current reporting season. Defaults to January 1 of the current
    /// year when unset or unreadable.
    pub async fn season_start(&self) -> DateTime<Local> {
        let raw = match self.storage.get(SEASON_START_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return default_season_start(),
            Err(e) => {
                warn!("Failed to read the season start date: {e:#}");
                return default_season_start();
            }
        };
        match serde_json::from_str::<DateTime<Local>>(&raw) {
            Ok(date) => date,
            Err(e) => {
                warn!("Ignoring unreadable season start date: {e:#}");
                default_season_start()
            }
        }
    }

    /// Persists the season start date unconditionally; no range validation is applied.
    pub async fn set_season_start(&self, date: DateTime<Local>) {
        match serde_json::to_string(&date) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(SEASON_START_KEY, &raw).await {
                    warn!("Failed to write the season start date: {e:#}");
                }
            }
            Err(e) => warn!("Failed to serialize the season start date: {e:#}"),
        }
    }
}

/// January 1, midnight local time, of the current year.
fn default_season_start() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(Local::now().year(), 1, 1, 0, 0, 0)
        .earliest()
        .unwrap_or_else(Local::now)
}
