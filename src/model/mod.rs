//! Types that represent the core data model, such as `Transaction`, `Plot` and
//! `InventoryItem`.
mod amount;
mod category;
mod inventory;
mod plot;
mod transaction;

pub use amount::Amount;
pub use category::{Category, DEFAULT_CATEGORY_COLOR, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use inventory::{InventoryItem, Unit, FIXED_UNITS};
pub use plot::Plot;
pub use transaction::{Transaction, TransactionKind};
