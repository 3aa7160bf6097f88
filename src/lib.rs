//! farm-ledger: local-first bookkeeping for small farms.
//!
//! Transactions, plots and inventory items are stored as JSON lists behind a small
//! key-value [`Storage`] port, and pure functions in [`summary`] derive the totals and
//! category breakdowns shown on the dashboard.

mod error;
mod home;
mod ledger;
mod storage;

pub mod args;
pub mod commands;
pub mod model;
pub mod summary;


pub use error::{Error, Result};
pub use home::Home;
pub use ledger::{
    Ledger, Record, StockPolicy, INVENTORY_KEY, PLOTS_KEY, SEASON_START_KEY, TRANSACTIONS_KEY,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
