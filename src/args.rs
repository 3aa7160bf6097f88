//! These structs provide the CLI interface for the farm ledger.

use crate::ledger::StockPolicy;
use crate::model::{Amount, Category, TransactionKind, Unit};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// farm: a command-line ledger for small-farm finances.
///
/// Record income and expense transactions, the plots they belong to, and the supplies
/// you keep in stock. Everything is stored locally as JSON under the farm home
/// directory; the dashboard subcommand shows today/month/season totals and a
/// per-category expense breakdown.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Record and manage income and expense transactions.
    #[command(subcommand)]
    Transaction(TransactionCommand),
    /// Manage plots of farmland and view per-plot profitability.
    #[command(subcommand)]
    Plot(PlotCommand),
    /// Manage stocked supplies such as seed and fertilizer.
    #[command(subcommand)]
    Inventory(InventoryCommand),
    /// Show today/month/season totals and the season expense breakdown.
    Dashboard,
    /// Show the season start date, or move it with --set.
    Season(SeasonArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where farm ledger data is held. Defaults to ~/.farm-ledger
    #[arg(long, env = "FARM_LEDGER_HOME", default_value_t = default_farm_home())]
    farm_home: DisplayPath,

    /// How a transaction that links an inventory item moves that item's stock.
    /// "acquire-on-expense" counts expense links as purchases (stock goes up);
    /// "consume-on-expense" counts them as usage (stock goes down).
    #[arg(long, default_value_t)]
    stock_policy: StockPolicy,
}

impl Common {
    pub fn new(log_level: LevelFilter, farm_home: PathBuf, stock_policy: StockPolicy) -> Self {
        Self {
            log_level,
            farm_home: farm_home.into(),
            stock_policy,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn farm_home(&self) -> &DisplayPath {
        &self.farm_home
    }

    pub fn stock_policy(&self) -> StockPolicy {
        self.stock_policy
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum TransactionCommand {
    /// Record a new transaction.
    Add(AddTransactionArgs),
    /// List transactions, newest first, optionally filtered.
    List(ListTransactionArgs),
    /// Delete a transaction by id. Stock moved by a linked transaction is not restored.
    Delete(DeleteArgs),
}

/// Args for `farm transaction add`.
#[derive(Debug, Parser, Clone)]
pub struct AddTransactionArgs {
    /// A short title, e.g. "Urea bags" or "Wheat sale".
    #[arg(long)]
    title: String,

    /// Income or Expense.
    #[arg(long = "type", default_value_t)]
    kind: TransactionKind,

    /// The category. Fixed names like Seeds, Fertilizer or Crops are recognized;
    /// anything else becomes a custom category.
    #[arg(long)]
    category: Category,

    /// The amount, e.g. 1500 or 99.50.
    #[arg(long)]
    amount: Amount,

    /// The transaction date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// The id of the plot this transaction belongs to.
    #[arg(long)]
    plot_id: Option<String>,

    /// The id of the inventory item this transaction moves stock for.
    #[arg(long)]
    inventory_item_id: Option<String>,

    /// The stock quantity moved; only valid together with --inventory-item-id.
    #[arg(long)]
    quantity: Option<Decimal>,

    /// Free-form note.
    #[arg(long)]
    note: Option<String>,
}

impl AddTransactionArgs {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: impl Into<String>,
        kind: TransactionKind,
        category: Category,
        amount: Amount,
        date: Option<NaiveDate>,
        plot_id: Option<String>,
        inventory_item_id: Option<String>,
        quantity: Option<Decimal>,
        note: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            kind,
            category,
            amount,
            date,
            plot_id,
            inventory_item_id,
            quantity,
            note,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn plot_id(&self) -> Option<&str> {
        self.plot_id.as_deref()
    }

    pub fn inventory_item_id(&self) -> Option<&str> {
        self.inventory_item_id.as_deref()
    }

    pub fn quantity(&self) -> Option<Decimal> {
        self.quantity
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// The reporting window used when listing transactions.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    Today,
    Month,
    Season,
}

serde_plain::derive_display_from_serialize!(Period);
serde_plain::derive_fromstr_from_deserialize!(Period);

/// Args for `farm transaction list`.
#[derive(Debug, Parser, Clone)]
pub struct ListTransactionArgs {
    /// Restrict the listing to a reporting window: all, today, month or season.
    #[arg(long, default_value_t)]
    period: Period,

    /// Only show transactions in this category.
    #[arg(long)]
    category: Option<Category>,

    /// Only show transactions assigned to this plot id.
    #[arg(long)]
    plot_id: Option<String>,
}

impl ListTransactionArgs {
    pub fn new(period: Period, category: Option<Category>, plot_id: Option<String>) -> Self {
        Self {
            period,
            category,
            plot_id,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn plot_id(&self) -> Option<&str> {
        self.plot_id.as_deref()
    }
}

/// Args for the delete subcommands; all deletions are by id.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the record to delete.
    id: String,
}

impl DeleteArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlotCommand {
    /// Add a plot of farmland.
    Add(AddPlotArgs),
    /// List all plots.
    List,
    /// Show a plot with its income, expense and profit totals.
    Show(ShowPlotArgs),
    /// Delete a plot by id. Its transactions are kept and become unassigned.
    Delete(DeleteArgs),
}

/// Args for `farm plot add`.
#[derive(Debug, Parser, Clone)]
pub struct AddPlotArgs {
    /// The plot name, e.g. "North Field".
    #[arg(long)]
    name: String,

    /// The plot area in acres.
    #[arg(long)]
    area: Decimal,

    /// The crop grown on this plot, e.g. "Wheat".
    #[arg(long)]
    crop_type: String,
}

impl AddPlotArgs {
    pub fn new(name: impl Into<String>, area: Decimal, crop_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            area,
            crop_type: crop_type.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn area(&self) -> Decimal {
        self.area
    }

    pub fn crop_type(&self) -> &str {
        &self.crop_type
    }
}

/// Args for `farm plot show`.
#[derive(Debug, Parser, Clone)]
pub struct ShowPlotArgs {
    /// The id of the plot to show.
    id: String,
}

impl ShowPlotArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum InventoryCommand {
    /// Add a stocked supply.
    Add(AddInventoryArgs),
    /// List all inventory items with their current stock.
    List,
    /// Apply a signed stock adjustment to an item.
    Adjust(AdjustInventoryArgs),
    /// Delete an inventory item by id.
    Delete(DeleteArgs),
}

/// Args for `farm inventory add`.
#[derive(Debug, Parser, Clone)]
pub struct AddInventoryArgs {
    /// The item name, e.g. "Urea".
    #[arg(long)]
    name: String,

    /// The item category, e.g. Fertilizer.
    #[arg(long)]
    category: Category,

    /// The starting stock quantity.
    #[arg(long)]
    quantity: Decimal,

    /// The measurement unit: kg, bags or L. Other values are kept as typed.
    #[arg(long, default_value_t)]
    unit: Unit,

    /// Optional price per unit, used by the entry forms to suggest amounts.
    #[arg(long)]
    price_per_unit: Option<Decimal>,
}

impl AddInventoryArgs {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        quantity: Decimal,
        unit: Unit,
        price_per_unit: Option<Decimal>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            quantity,
            unit,
            price_per_unit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn price_per_unit(&self) -> Option<Decimal> {
        self.price_per_unit
    }
}

/// Args for `farm inventory adjust`.
#[derive(Debug, Parser, Clone)]
pub struct AdjustInventoryArgs {
    /// The id of the item to adjust.
    id: String,

    /// The signed quantity to add to the current stock, e.g. 5 or -2.5.
    #[arg(allow_hyphen_values = true)]
    delta: Decimal,
}

impl AdjustInventoryArgs {
    pub fn new(id: impl Into<String>, delta: Decimal) -> Self {
        Self {
            id: id.into(),
            delta,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn delta(&self) -> Decimal {
        self.delta
    }
}

/// Args for `farm season`.
#[derive(Debug, Parser, Clone)]
pub struct SeasonArgs {
    /// Move the season start to this date (YYYY-MM-DD). Prints the current start when
    /// omitted.
    #[arg(long)]
    set: Option<NaiveDate>,
}

impl SeasonArgs {
    pub fn new(set: Option<NaiveDate>) -> Self {
        Self { set }
    }

    pub fn set(&self) -> Option<NaiveDate> {
        self.set
    }
}

fn default_farm_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join(".farm-ledger"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --farm-home or FARM_LEDGER_HOME instead of relying on the \
                default farm home directory. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from(".farm-ledger")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
