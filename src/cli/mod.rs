//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the transaction store.

pub mod export;
pub mod report;
pub mod transaction;

pub use export::{handle_export_command, ExportArgs};
pub use report::{handle_balance_command, handle_categories_command};
pub use transaction::{handle_transaction_command, TransactionCommands};
