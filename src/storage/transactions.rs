//! Transaction store
//!
//! Owns the in-memory transaction list and its JSON mirror on disk. Every
//! mutation rewrites the whole file before returning, and is rolled back in
//! memory if that write fails.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    class_of, CategoryClass, Money, Transaction, TransactionId, TransactionInput,
};
use crate::reports::BalanceSummary;

use super::file_io::{preserve_corrupt, read_json, write_json_atomic};

/// On-disk layout, as read
///
/// Older files are a bare array of transactions.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredFile {
    Document {
        #[serde(default)]
        last_id: u32,
        transactions: Vec<Value>,
    },
    Legacy(Vec<Value>),
}

/// On-disk layout, as written
#[derive(Serialize)]
struct StoredDocument<'a> {
    last_id: u32,
    transactions: Vec<StoredRecord<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum StoredRecord<'a> {
    Valid(&'a Transaction),
    Quarantined(&'a Value),
}

/// Why a record (or the whole file) was not loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssueKind {
    /// The file could not be read or parsed; the store started empty
    MalformedFile(String),
    /// The record's category is not in the category table
    UnclassifiableCategory(String),
    /// Another record earlier in the file already uses this id
    DuplicateId(TransactionId),
    /// Any other decoding failure
    InvalidRecord(String),
}

/// A data-integrity problem found while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    /// Index of the record in the file, if the issue concerns one record
    pub position: Option<usize>,
    /// The record's id, when it had a readable one
    pub id: Option<u32>,
    pub kind: LoadIssueKind,
}

impl LoadIssue {
    /// The issue as a tracker error
    pub fn to_error(&self) -> TrackerError {
        match &self.kind {
            LoadIssueKind::UnclassifiableCategory(label) => {
                TrackerError::UnclassifiableCategory(label.clone())
            }
            _ => TrackerError::Storage(self.to_string()),
        }
    }
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = self.position {
            write!(f, "record {}", position + 1)?;
            if let Some(id) = self.id {
                write!(f, " (id {})", id)?;
            }
            write!(f, ": ")?;
        }

        match &self.kind {
            LoadIssueKind::MalformedFile(reason) => write!(f, "malformed file: {}", reason),
            LoadIssueKind::UnclassifiableCategory(label) => {
                write!(f, "unclassifiable category '{}'", label)
            }
            LoadIssueKind::DuplicateId(id) => write!(f, "duplicate id {}", id),
            LoadIssueKind::InvalidRecord(reason) => write!(f, "invalid record: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Ledger {
    transactions: Vec<Transaction>,
    /// Records that failed to load, written back verbatim
    quarantined: Vec<Value>,
    /// Highest id ever handed out or seen in the file
    last_id: u32,
}

impl Ledger {
    fn next_id(&mut self) -> TrackerResult<TransactionId> {
        let max_live = self
            .transactions
            .iter()
            .map(|t| t.id.value())
            .max()
            .unwrap_or(0);
        let next = self
            .last_id
            .max(max_live)
            .checked_add(1)
            .ok_or_else(|| TrackerError::Storage("Transaction id space exhausted".into()))?;
        self.last_id = next;
        Ok(TransactionId::new(next))
    }

    fn position(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id == id)
    }

    fn to_document(&self) -> StoredDocument<'_> {
        let transactions = self
            .transactions
            .iter()
            .map(StoredRecord::Valid)
            .chain(self.quarantined.iter().map(StoredRecord::Quarantined))
            .collect();

        StoredDocument {
            last_id: self.last_id,
            transactions,
        }
    }
}

/// The authoritative transaction collection
///
/// One store per file. All operations go through a single lock, so callers
/// on different threads see them strictly one after another.
pub struct TransactionStore {
    path: PathBuf,
    ledger: RwLock<Ledger>,
    issues: Vec<LoadIssue>,
}

impl TransactionStore {
    /// Open the store backed by `path`
    ///
    /// A missing file is an empty ledger. A file that cannot be read or
    /// parsed is copied to `<file>.corrupt` and the store starts empty.
    /// Individual bad records are reported by [`load_issues`](Self::load_issues)
    /// and kept on disk untouched.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let (ledger, issues) = match read_json::<Option<StoredFile>, _>(&path) {
            Ok(None) => {
                debug!(path = %path.display(), "no transaction file, starting empty");
                (Ledger::default(), Vec::new())
            }
            Ok(Some(stored)) => decode(stored),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "transaction file unusable, starting empty");
                match preserve_corrupt(&path) {
                    Ok(copy) => warn!(copy = %copy.display(), "kept a copy of the unusable file"),
                    Err(copy_err) => warn!(error = %copy_err, "could not keep a copy of the unusable file"),
                }
                let issue = LoadIssue {
                    position: None,
                    id: None,
                    kind: LoadIssueKind::MalformedFile(e.to_string()),
                };
                (Ledger::default(), vec![issue])
            }
        };

        for issue in issues.iter().filter(|i| i.position.is_some()) {
            warn!(path = %path.display(), "skipped {}", issue);
        }

        Self {
            path,
            ledger: RwLock::new(ledger),
            issues,
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Problems found when the file was loaded
    pub fn load_issues(&self) -> &[LoadIssue] {
        &self.issues
    }

    /// All transactions, in insertion order
    pub fn get_all(&self) -> TrackerResult<Vec<Transaction>> {
        Ok(self.read()?.transactions.clone())
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TrackerResult<Transaction> {
        self.read()?
            .transactions
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| TrackerError::transaction_not_found(id))
    }

    /// Transactions whose category belongs to `class`
    pub fn get_by_class(&self, class: CategoryClass) -> TrackerResult<Vec<Transaction>> {
        Ok(self
            .read()?
            .transactions
            .iter()
            .filter(|t| t.class() == class)
            .cloned()
            .collect())
    }

    /// Like [`get_by_class`](Self::get_by_class), from a class name such as
    /// `"Income"`. Names other than income/expense are a validation error.
    pub fn get_by_class_name(&self, class: &str) -> TrackerResult<Vec<Transaction>> {
        self.get_by_class(class.parse()?)
    }

    /// Number of transactions
    pub fn count(&self) -> TrackerResult<usize> {
        Ok(self.read()?.transactions.len())
    }

    /// Store a new transaction and return it with its id
    pub fn add(&self, input: TransactionInput) -> TrackerResult<Transaction> {
        let txn = self.commit(|ledger| {
            let txn = Transaction::from_input(ledger.next_id()?, input);
            ledger.transactions.push(txn.clone());
            Ok(txn)
        })?;

        info!(id = %txn.id, category = %txn.category, amount = %txn.amount, "added transaction");
        Ok(txn)
    }

    /// Replace every field of transaction `id` except the id itself
    pub fn update(&self, id: TransactionId, input: TransactionInput) -> TrackerResult<Transaction> {
        let txn = self.commit(|ledger| {
            let index = ledger
                .position(id)
                .ok_or_else(|| TrackerError::transaction_not_found(id))?;
            let txn = &mut ledger.transactions[index];
            txn.apply(input);
            Ok(txn.clone())
        })?;

        info!(id = %txn.id, category = %txn.category, amount = %txn.amount, "updated transaction");
        Ok(txn)
    }

    /// Remove transaction `id`, returning what was removed
    pub fn delete(&self, id: TransactionId) -> TrackerResult<Transaction> {
        let txn = self.commit(|ledger| {
            let index = ledger
                .position(id)
                .ok_or_else(|| TrackerError::transaction_not_found(id))?;
            Ok(ledger.transactions.remove(index))
        })?;

        info!(id = %txn.id, "deleted transaction");
        Ok(txn)
    }

    /// Income minus expenses over all transactions
    pub fn balance(&self) -> TrackerResult<Money> {
        Ok(self.summary()?.balance)
    }

    /// Income, expense and balance totals
    pub fn summary(&self) -> TrackerResult<BalanceSummary> {
        Ok(BalanceSummary::from_transactions(&self.read()?.transactions))
    }

    /// Apply `change` to a copy of the ledger, persist the copy, then swap it in.
    /// The write lock is held throughout.
    fn commit<T>(&self, change: impl FnOnce(&mut Ledger) -> TrackerResult<T>) -> TrackerResult<T> {
        let mut ledger = self.write()?;
        let mut draft = ledger.clone();
        let result = change(&mut draft)?;

        if let Err(e) = self.persist(&draft) {
            error!(path = %self.path.display(), error = %e, "persist failed, mutation rolled back");
            return Err(e);
        }

        *ledger = draft;
        Ok(result)
    }

    fn persist(&self, ledger: &Ledger) -> TrackerResult<()> {
        write_json_atomic(&self.path, &ledger.to_document())?;
        debug!(
            path = %self.path.display(),
            records = ledger.transactions.len() + ledger.quarantined.len(),
            "persisted transactions"
        );
        Ok(())
    }

    fn read(&self) -> TrackerResult<RwLockReadGuard<'_, Ledger>> {
        self.ledger
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TrackerResult<RwLockWriteGuard<'_, Ledger>> {
        self.ledger
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

/// Turn raw records into a ledger, quarantining the ones that do not decode
fn decode(stored: StoredFile) -> (Ledger, Vec<LoadIssue>) {
    let (last_id, records) = match stored {
        StoredFile::Document {
            last_id,
            transactions,
        } => (last_id, transactions),
        StoredFile::Legacy(records) => (0, records),
    };

    let mut ledger = Ledger {
        last_id,
        ..Ledger::default()
    };
    let mut issues = Vec::new();

    for (position, record) in records.into_iter().enumerate() {
        let id = raw_field(&record, "id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok());
        if let Some(id) = id {
            ledger.last_id = ledger.last_id.max(id);
        }

        let kind = match serde_json::from_value::<Transaction>(record.clone()) {
            Ok(txn) if ledger.position(txn.id).is_some() => LoadIssueKind::DuplicateId(txn.id),
            Ok(txn) => {
                ledger.transactions.push(txn);
                continue;
            }
            Err(e) => match raw_field(&record, "category").and_then(Value::as_str) {
                Some(label) if class_of(label).is_err() => {
                    LoadIssueKind::UnclassifiableCategory(label.to_string())
                }
                _ => LoadIssueKind::InvalidRecord(e.to_string()),
            },
        };

        issues.push(LoadIssue {
            position: Some(position),
            id,
            kind,
        });
        ledger.quarantined.push(record);
    }

    (ledger, issues)
}

/// Look up a field by its lowercase name or its PascalCase alias
fn raw_field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    let mut pascal = name.to_string();
    if let Some(first) = pascal.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    record.get(name).or_else(|| record.get(&pascal))
}
