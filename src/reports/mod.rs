//! Reports module for the tracker
//!
//! Figures derived from the transaction list. Nothing here is persisted.

pub mod balance;

pub use balance::{BalanceSummary, CategoryTotal};
