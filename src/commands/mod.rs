//! Command handlers for the farm CLI.
//!
//! Each handler validates its input (the store itself does not), calls into the
//! [`Ledger`](crate::Ledger), and returns an [`Out`] for printing.

mod dashboard;
mod inventory;
mod plot;
mod season;
mod transaction;

use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use dashboard::{dashboard, Dashboard};
pub use inventory::{add_inventory_item, adjust_inventory, delete_inventory_item, list_inventory};
pub use plot::{add_plot, delete_plot, list_plots, show_plot, PlotReport};
pub use season::season;
pub use transaction::{add_transaction, delete_transaction, list_transactions};

/// The output type for a command: a printable message plus, optionally, structured data
/// for callers that want more than text.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command
    /// execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to
    /// `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Generates a unique record id with an entity prefix, e.g. `txn-1c9f…`. The store
/// requires caller-generated ids, so every `add` handler goes through here.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
