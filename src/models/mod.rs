//! Core data models for the tracker
//!
//! Transactions, the closed category table and the value types they are
//! built from.

pub mod category;
pub mod ids;
pub mod money;
pub mod transaction;

pub use category::{class_of, Category, CategoryClass};
pub use ids::TransactionId;
pub use money::Money;
pub use transaction::{parse_timestamp, Transaction, TransactionInput};
