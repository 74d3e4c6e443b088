//! Transaction display formatting
//!
//! Register views, detail views and balance summaries for the terminal.
//! Expenses go in the outflow column and income in the inflow column, so the
//! amounts themselves are shown unsigned-as-stored.

use crate::config::Settings;
use crate::models::{Category, CategoryClass, Money, Transaction};
use crate::reports::BalanceSummary;
use crate::storage::LoadIssue;

fn money(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    let (outflow, inflow) = match txn.class() {
        CategoryClass::Expense => (money(txn.amount, settings), String::new()),
        CategoryClass::Income => (String::new(), money(txn.amount, settings)),
    };

    format!(
        "{:>5} {:10} {:13} {} {:>12} {:>12}",
        txn.id,
        txn.date.format(settings.effective_date_format()).to_string(),
        txn.category.label(),
        truncate(&txn.description, 24),
        outflow,
        inflow
    )
}

/// Format a list of transactions as a register
///
/// The footer totals the rows shown, which may be only part of the ledger.
pub fn format_transaction_register(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>5} {:10} {:13} {:24} {:>12} {:>12}\n",
        "ID", "Date", "Category", "Description", "Outflow", "Inflow"
    ));
    output.push_str(&"-".repeat(81));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    let shown_total: Money = transactions.iter().map(Transaction::signed_amount).sum();
    output.push_str(&"-".repeat(81));
    output.push('\n');
    output.push_str(&format!("{:>68} {:>12}\n", "Shown total:", money(shown_total, settings)));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d %H:%M:%S")));
    output.push_str(&format!("Amount:      {}\n", money(txn.amount, settings)));
    output.push_str(&format!("Category:    {} ({})\n", txn.category, txn.class()));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

/// Format the income/expense/balance summary
pub fn format_balance_summary(summary: &BalanceSummary, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Income:   {:>14}  ({} transactions)\n",
        money(summary.income, settings),
        summary.income_count
    ));
    output.push_str(&format!(
        "Expenses: {:>14}  ({} transactions)\n",
        money(summary.expenses, settings),
        summary.expense_count
    ));
    output.push_str(&"-".repeat(25));
    output.push('\n');
    output.push_str(&format!("Balance:  {:>14}\n", money(summary.balance, settings)));

    if !summary.by_category.is_empty() {
        output.push_str("\nBy category:\n");
        for row in &summary.by_category {
            output.push_str(&format!(
                "  {:13} {:7} {:>14}  ({})\n",
                row.category.label(),
                row.category.class(),
                money(row.total, settings),
                row.transaction_count
            ));
        }
    }

    output
}

/// Format the category table grouped by class
pub fn format_category_table() -> String {
    let mut output = String::new();

    for class in CategoryClass::all() {
        let labels: Vec<_> = class.categories().map(|c: Category| c.label()).collect();
        output.push_str(&format!("{:8} {}\n", format!("{}:", class), labels.join(", ")));
    }

    output
}

/// Format problems found while loading the transaction file
pub fn format_load_issues(issues: &[LoadIssue]) -> String {
    let mut output = String::new();

    for issue in issues {
        output.push_str(&format!("warning: {}\n", issue));
    }

    output
}

/// Pad or cut a string to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, TransactionInput};
    use chrono::NaiveDate;

    fn txn(id: u32, cents: i64, category: Category, description: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Transaction::from_input(
            TransactionId::new(id),
            TransactionInput::new(Money::from_cents(cents), category, date)
                .with_description(description),
        )
    }

    #[test]
    fn test_register_columns_follow_class() {
        let settings = Settings::default();
        let register = format_transaction_register(
            &[
                txn(1, 10000, Category::Salary, "Pay"),
                txn(2, 3000, Category::Groceries, "Food"),
            ],
            &settings,
        );

        let lines: Vec<_> = register.lines().collect();
        assert!(lines[2].trim_end().ends_with("$100.00"));
        assert!(lines[3].contains("$30.00"));
        assert!(!lines[3].trim_end().ends_with("$100.00"));
        assert!(register.contains("Shown total:"));
        assert!(!register.contains("Balance:"));
        assert!(register.trim_end().ends_with("$70.00"));
    }

    #[test]
    fn test_unrenderable_date_format_falls_back() {
        let settings = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };

        let row = format_transaction_row(&txn(1, 100, Category::Sales, ""), &settings);
        assert!(row.contains("2025-01-15"));

        let register = format_transaction_register(&[txn(1, 100, Category::Sales, "")], &settings);
        assert!(register.contains("2025-01-15"));
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], &Settings::default()),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_details() {
        let details = format_transaction_details(
            &txn(4, 1299, Category::Subscriptions, "Streaming"),
            &Settings::default(),
        );

        assert!(details.contains("Transaction: 4"));
        assert!(details.contains("Subscriptions (expense)"));
        assert!(details.contains("$12.99"));
        assert!(details.contains("Streaming"));
    }

    #[test]
    fn test_summary_uses_currency_symbol() {
        let settings = Settings {
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        let summary = BalanceSummary::from_transactions(&[txn(1, 500, Category::Sales, "")]);

        let text = format_balance_summary(&summary, &settings);
        assert!(text.contains("€5.00"));
        assert!(text.contains("Sales"));
    }

    #[test]
    fn test_category_table() {
        let table = format_category_table();
        assert!(table.contains("income:  Salary, Sales, SideHustle, Allowances"));
        assert!(table.contains("expense: Entertainment, Groceries, Subscriptions"));
    }

    #[test]
    fn test_truncate_handles_multibyte() {
        assert_eq!(truncate("café", 6), "café  ");
        assert_eq!(truncate("ééééééé", 6), "ééé...");
    }
}
