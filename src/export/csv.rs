//! CSV Export functionality
//!
//! Columns: `id,amount,category,class,date,description`. Amounts are plain
//! decimals with two places and no currency symbol.

use std::io::Write;

use ::csv::WriterBuilder;
use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Transaction;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: u32,
    amount: String,
    category: &'static str,
    class: &'static str,
    date: String,
    description: &'a str,
}

impl<'a> From<&'a Transaction> for CsvRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: txn.id.value(),
            amount: txn.amount.format_with_symbol(""),
            category: txn.category.label(),
            class: txn.class().name(),
            date: txn.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            description: &txn.description,
        }
    }
}

/// Write `transactions` as CSV, header first
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: W,
) -> TrackerResult<()> {
    let mut csv = WriterBuilder::new().has_headers(true).from_writer(writer);

    if transactions.is_empty() {
        // serde-driven headers are only written with the first row
        csv.write_record(["id", "amount", "category", "class", "date", "description"])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    for txn in transactions {
        csv.serialize(CsvRow::from(txn))
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv.flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}
