//! Category table
//!
//! The set of categories is closed. Every category belongs to exactly one
//! class, income or expense, and that class is what the balance and the
//! by-class queries are computed from. Amount signs play no part.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// Income or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryClass {
    Income,
    Expense,
}

impl CategoryClass {
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Categories belonging to this class, in display order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::all().iter().copied().filter(move |c| c.class() == *self)
    }
}

impl fmt::Display for CategoryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CategoryClass {
    type Err = TrackerError;

    /// Accepts `income` or `expense` in any case, surrounded by any whitespace.
    /// Anything else is rejected rather than defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(TrackerError::Validation(format!(
                "Unknown category class '{}'. Use 'income' or 'expense'",
                other
            ))),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Salary,
    Sales,
    SideHustle,
    Allowances,
    Entertainment,
    Groceries,
    Subscriptions,
}

impl Category {
    /// Get all categories, income first
    pub fn all() -> &'static [Self] {
        &[
            Self::Salary,
            Self::Sales,
            Self::SideHustle,
            Self::Allowances,
            Self::Entertainment,
            Self::Groceries,
            Self::Subscriptions,
        ]
    }

    /// Canonical label, as written to disk
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Sales => "Sales",
            Self::SideHustle => "SideHustle",
            Self::Allowances => "Allowances",
            Self::Entertainment => "Entertainment",
            Self::Groceries => "Groceries",
            Self::Subscriptions => "Subscriptions",
        }
    }

    /// The class this category belongs to
    pub fn class(&self) -> CategoryClass {
        match self {
            Self::Salary | Self::Sales | Self::SideHustle | Self::Allowances => {
                CategoryClass::Income
            }
            Self::Entertainment | Self::Groceries | Self::Subscriptions => CategoryClass::Expense,
        }
    }

    pub fn is_income(&self) -> bool {
        self.class() == CategoryClass::Income
    }

    pub fn is_expense(&self) -> bool {
        self.class() == CategoryClass::Expense
    }
}

/// Resolve a raw label to its class
///
/// Used for labels that did not come through `Category` parsing, such as
/// records read back from a hand-edited file.
pub fn class_of(label: &str) -> Result<CategoryClass, TrackerError> {
    label
        .parse::<Category>()
        .map(|c| c.class())
        .map_err(|_| TrackerError::UnclassifiableCategory(label.to_string()))
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = TrackerError;

    /// Case and whitespace are ignored, so "Side Hustle", "sidehustle" and
    /// "SideHustle" are the same category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        let category = match key.as_str() {
            "salary" => Self::Salary,
            "sales" => Self::Sales,
            "sidehustle" => Self::SideHustle,
            "allowances" | "allowance" => Self::Allowances,
            "entertainment" => Self::Entertainment,
            "groceries" => Self::Groceries,
            // "subsriptions" appears in files written by older versions
            "subscriptions" | "subsriptions" => Self::Subscriptions,
            _ => {
                return Err(TrackerError::Validation(format!(
                    "Unknown category '{}'. Valid categories: {}",
                    s.trim(),
                    Category::all()
                        .iter()
                        .map(|c| c.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                )))
            }
        };

        Ok(category)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_categories() {
        for label in ["Salary", "Sales", "SideHustle", "Allowances"] {
            assert_eq!(class_of(label).unwrap(), CategoryClass::Income, "{}", label);
        }
    }

    #[test]
    fn test_expense_categories() {
        for label in ["Entertainment", "Groceries", "Subscriptions"] {
            assert_eq!(class_of(label).unwrap(), CategoryClass::Expense, "{}", label);
        }
    }

    #[test]
    fn test_classes_partition_categories() {
        let income: Vec<_> = CategoryClass::Income.categories().collect();
        let expense: Vec<_> = CategoryClass::Expense.categories().collect();

        assert_eq!(income.len(), 4);
        assert_eq!(expense.len(), 3);
        assert_eq!(income.len() + expense.len(), Category::all().len());
        assert!(income.iter().all(|c| !expense.contains(c)));
    }

    #[test]
    fn test_unknown_label_is_unclassifiable() {
        let err = class_of("Lottery").unwrap_err();
        assert!(matches!(err, TrackerError::UnclassifiableCategory(ref l) if l == "Lottery"));
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_spacing() {
        assert_eq!("sidehustle".parse::<Category>().unwrap(), Category::SideHustle);
        assert_eq!("Side Hustle".parse::<Category>().unwrap(), Category::SideHustle);
        assert_eq!("  GROCERIES ".parse::<Category>().unwrap(), Category::Groceries);
        assert_eq!("allowance".parse::<Category>().unwrap(), Category::Allowances);
        assert_eq!("Subsriptions".parse::<Category>().unwrap(), Category::Subscriptions);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "Rent".parse::<Category>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Salary"));
    }

    #[test]
    fn test_class_parse() {
        assert_eq!("income".parse::<CategoryClass>().unwrap(), CategoryClass::Income);
        assert_eq!(" Expense ".parse::<CategoryClass>().unwrap(), CategoryClass::Expense);
        assert!("savings".parse::<CategoryClass>().unwrap_err().is_validation());
        assert!("".parse::<CategoryClass>().is_err());
    }

    #[test]
    fn test_serialization_uses_canonical_label() {
        let json = serde_json::to_string(&Category::SideHustle).unwrap();
        assert_eq!(json, "\"SideHustle\"");

        let legacy: Category = serde_json::from_str("\"Subsriptions\"").unwrap();
        assert_eq!(serde_json::to_string(&legacy).unwrap(), "\"Subscriptions\"");

        assert!(serde_json::from_str::<Category>("\"Lottery\"").is_err());
    }
}
