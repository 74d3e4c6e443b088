//! CLI command for CSV export

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::Args;

use crate::error::{TrackerError, TrackerResult};
use crate::export::export_transactions_csv;
use crate::storage::TransactionStore;

/// Arguments for `tracker export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only income or only expense
    #[arg(short, long)]
    pub class: Option<String>,
}

/// Handle the export command
pub fn handle_export_command(store: &TransactionStore, args: ExportArgs) -> TrackerResult<()> {
    let transactions = match &args.class {
        Some(class) => store.get_by_class_name(class)?,
        None => store.get_all()?,
    };

    match args.output {
        Some(output) => {
            let file = File::create(&output).map_err(|e| {
                TrackerError::Export(format!("Failed to create file {}: {}", output.display(), e))
            })?;
            export_transactions_csv(&transactions, BufWriter::new(file))?;
            eprintln!(
                "Exported {} transactions to: {}",
                transactions.len(),
                output.display()
            );
        }
        None => export_transactions_csv(&transactions, io::stdout().lock())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionInput};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_export_to_file_with_class_filter() {
        let temp_dir = TempDir::new().unwrap();
        let store = TransactionStore::open(temp_dir.path().join("transactions.json"));
        let date = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        store
            .add(TransactionInput::new(Money::from_cents(10000), Category::Salary, date))
            .unwrap();
        store
            .add(TransactionInput::new(Money::from_cents(3000), Category::Groceries, date))
            .unwrap();

        let output = temp_dir.path().join("out.csv");
        handle_export_command(
            &store,
            ExportArgs {
                output: Some(output.clone()),
                class: Some("expense".into()),
            },
        )
        .unwrap();

        let csv = std::fs::read_to_string(output).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Groceries"));
        assert!(!csv.contains("Salary"));
    }
}
