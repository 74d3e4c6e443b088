//! Tracker - a personal finance ledger
//!
//! Transactions are recorded with a category, the category decides whether
//! a transaction is income or expense, and the balance is derived from that.
//! All state lives in one JSON file that is rewritten on every change.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Transactions, categories and value types
//! - `storage`: The transaction store and its JSON file
//! - `reports`: Balance derivation
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `tracker` binary
//! - `logging`: `tracing` subscriber setup
//!
//! # Example
//!
//! ```rust,no_run
//! use tracker::models::{Category, Money, TransactionInput};
//! use tracker::storage::TransactionStore;
//!
//! let store = TransactionStore::open("transactions.json");
//! let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 15)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! store.add(TransactionInput::new(Money::from_cents(250000), Category::Salary, date))?;
//! println!("balance: {}", store.balance()?);
//! # Ok::<(), tracker::TrackerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
