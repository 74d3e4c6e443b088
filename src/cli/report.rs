//! Report CLI commands: balance and the category table

use crate::config::Settings;
use crate::display::{format_balance_summary, format_category_table};
use crate::error::TrackerResult;
use crate::storage::TransactionStore;

/// Print income, expense and balance totals
pub fn handle_balance_command(store: &TransactionStore, settings: &Settings) -> TrackerResult<()> {
    let summary = store.summary()?;
    print!("{}", format_balance_summary(&summary, settings));
    Ok(())
}

/// Print the categories grouped by class
pub fn handle_categories_command() -> TrackerResult<()> {
    print!("{}", format_category_table());
    Ok(())
}
