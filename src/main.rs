use clap::Parser;
use farm_ledger::args::{Args, Command, InventoryCommand, PlotCommand, TransactionCommand};
use farm_ledger::{commands, Home, Ledger, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = Home::new(args.common().farm_home().path()).await?;
    let ledger = Ledger::new(home.storage()).with_policy(args.common().stock_policy());

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Transaction(transaction_command) => match transaction_command {
            TransactionCommand::Add(add_args) => {
                commands::add_transaction(&ledger, add_args.clone())
                    .await?
                    .print()
            }
            TransactionCommand::List(list_args) => {
                commands::list_transactions(&ledger, list_args.clone())
                    .await?
                    .print()
            }
            TransactionCommand::Delete(delete_args) => {
                commands::delete_transaction(&ledger, delete_args.clone())
                    .await?
                    .print()
            }
        },

        Command::Plot(plot_command) => match plot_command {
            PlotCommand::Add(add_args) => {
                commands::add_plot(&ledger, add_args.clone()).await?.print()
            }
            PlotCommand::List => commands::list_plots(&ledger).await?.print(),
            PlotCommand::Show(show_args) => {
                commands::show_plot(&ledger, show_args.clone()).await?.print()
            }
            PlotCommand::Delete(delete_args) => {
                commands::delete_plot(&ledger, delete_args.clone())
                    .await?
                    .print()
            }
        },

        Command::Inventory(inventory_command) => match inventory_command {
            InventoryCommand::Add(add_args) => {
                commands::add_inventory_item(&ledger, add_args.clone())
                    .await?
                    .print()
            }
            InventoryCommand::List => commands::list_inventory(&ledger).await?.print(),
            InventoryCommand::Adjust(adjust_args) => {
                commands::adjust_inventory(&ledger, adjust_args.clone())
                    .await?
                    .print()
            }
            InventoryCommand::Delete(delete_args) => {
                commands::delete_inventory_item(&ledger, delete_args.clone())
                    .await?
                    .print()
            }
        },

        Command::Dashboard => commands::dashboard(&ledger).await?.print(),

        Command::Season(season_args) => {
            commands::season(&ledger, season_args.clone()).await?.print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
