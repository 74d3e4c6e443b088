//! Display formatting for terminal output

pub mod transaction;

pub use transaction::{
    format_balance_summary, format_category_table, format_load_issues,
    format_transaction_details, format_transaction_register, format_transaction_row,
};
