//! Transaction model
//!
//! A transaction is an amount tagged with a category. Whether it counts as
//! income or expense comes from the category, never from the amount's sign.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::{Category, CategoryClass};
use super::ids::TransactionId;
use super::money::Money;

/// A recorded monetary movement
///
/// PascalCase aliases let files written by older versions load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store
    #[serde(alias = "Id")]
    pub id: TransactionId,

    #[serde(alias = "Amount")]
    pub amount: Money,

    #[serde(alias = "Category")]
    pub category: Category,

    /// Date and time of the movement
    #[serde(alias = "Date", deserialize_with = "deserialize_timestamp")]
    pub date: NaiveDateTime,

    #[serde(alias = "Description", default, deserialize_with = "deserialize_description")]
    pub description: String,
}

impl Transaction {
    /// Build a stored transaction from caller-supplied fields
    pub fn from_input(id: TransactionId, input: TransactionInput) -> Self {
        Self {
            id,
            amount: input.amount,
            category: input.category,
            date: input.date,
            description: input.description,
        }
    }

    /// Replace every field except the id
    pub fn apply(&mut self, input: TransactionInput) {
        self.amount = input.amount;
        self.category = input.category;
        self.date = input.date;
        self.description = input.description;
    }

    pub fn class(&self) -> CategoryClass {
        self.category.class()
    }

    pub fn is_income(&self) -> bool {
        self.category.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.category.is_expense()
    }

    /// Contribution of this transaction to the balance
    pub fn signed_amount(&self) -> Money {
        match self.class() {
            CategoryClass::Income => self.amount,
            CategoryClass::Expense => -self.amount,
        }
    }

    /// The caller-editable fields of this transaction
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description.clone(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

/// Everything a caller supplies for a transaction; the store adds the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInput {
    pub amount: Money,
    pub category: Category,
    pub date: NaiveDateTime,
    pub description: String,
}

impl TransactionInput {
    pub fn new(amount: Money, category: Category, date: NaiveDateTime) -> Self {
        Self {
            amount,
            category,
            date,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Parse a timestamp in any of the shapes clients send
///
/// Accepts `2025-01-15T10:30:00[.fff]`, the same with a space instead of the
/// `T`, RFC 3339 with a `Z` or offset (the wall-clock time is kept as
/// given), and a bare `2025-01-15` (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
}

fn deserialize_description<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
