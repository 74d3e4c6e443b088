//! Storage layer for the tracker
//!
//! JSON file storage with atomic writes. The whole transaction list lives in
//! one file that is rewritten on every change.

pub mod file_io;
pub mod transactions;

pub use file_io::{read_json, write_json_atomic};
pub use transactions::{LoadIssue, LoadIssueKind, TransactionStore};

use crate::config::paths::TrackerPaths;
use crate::error::TrackerError;

/// Open the transaction store at its default location under `paths`
pub fn open_default(paths: &TrackerPaths) -> Result<TransactionStore, TrackerError> {
    paths.ensure_directories()?;
    Ok(TransactionStore::open(paths.transactions_file()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = open_default(&paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert_eq!(store.path(), paths.transactions_file());
        assert_eq!(store.count().unwrap(), 0);
    }
}
