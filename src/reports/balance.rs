//! Balance report
//!
//! The balance is the sum of income amounts minus the sum of expense amounts,
//! where income and expense are decided by each transaction's category.

use crate::models::{Category, CategoryClass, Money, Transaction};

/// Total for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Money,
    pub transaction_count: usize,
}

/// Income, expense and balance over a set of transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSummary {
    /// Sum of income amounts
    pub income: Money,
    /// Sum of expense amounts (as a positive figure)
    pub expenses: Money,
    /// `income - expenses`
    pub balance: Money,
    pub income_count: usize,
    pub expense_count: usize,
    /// One row per category that has transactions, in category table order
    pub by_category: Vec<CategoryTotal>,
}

impl BalanceSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut income = Money::zero();
        let mut expenses = Money::zero();
        let mut income_count = 0;
        let mut expense_count = 0;

        for txn in transactions {
            match txn.class() {
                CategoryClass::Income => {
                    income += txn.amount;
                    income_count += 1;
                }
                CategoryClass::Expense => {
                    expenses += txn.amount;
                    expense_count += 1;
                }
            }
        }

        let by_category = Category::all()
            .iter()
            .filter_map(|&category| {
                let matching: Vec<_> = transactions
                    .iter()
                    .filter(|t| t.category == category)
                    .collect();
                if matching.is_empty() {
                    return None;
                }
                Some(CategoryTotal {
                    category,
                    total: matching.iter().map(|t| t.amount).sum(),
                    transaction_count: matching.len(),
                })
            })
            .collect();

        Self {
            income,
            expenses,
            balance: income - expenses,
            income_count,
            expense_count,
            by_category,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.balance.is_negative()
    }
}
