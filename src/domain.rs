//! Core domain types shared by every page: money amounts and the fixed
//! enumerations that transactions, payments and loans draw their labels from.
//!
//! Labels are parsed, displayed and stored as the text the user sees, e.g.
//! `"Food & Groceries"`. Anything outside an enumeration is rejected when a
//! form is decoded or a row is read.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer};

use crate::Error;

/// Implements parsing, display, SQL conversion and form decoding for an enum
/// whose variants each have a fixed text label.
macro_rules! labelled_enum {
    ($name:ident, $kind:literal, [$($variant:ident => $label:literal),+ $(,)?]) => {
        impl $name {
            /// Every variant, in display order.
            pub const ALL: &[$name] = &[$($name::$variant),+];

            /// The text label shown to users and stored in the database.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(Error::InvalidLabel(other.to_owned(), $kind)),
                }
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.label()))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let label = String::deserialize(deserializer)?;
                label.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// What a transaction was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Category {
    FoodAndGroceries,
    Transportation,
    HousingRent,
    Utilities,
    Entertainment,
    Shopping,
    Healthcare,
    Salary,
    Other,
}

labelled_enum!(Category, "category", [
    FoodAndGroceries => "Food & Groceries",
    Transportation => "Transportation",
    HousingRent => "Housing/Rent",
    Utilities => "Utilities",
    Entertainment => "Entertainment",
    Shopping => "Shopping",
    Healthcare => "Healthcare",
    Salary => "Salary",
    Other => "Other",
]);

impl Category {
    /// The categories a budget can be set for, in display order.
    ///
    /// Salary is income, so it has no spending budget.
    pub const BUDGETED: &[Category] = &[
        Category::FoodAndGroceries,
        Category::Transportation,
        Category::HousingRent,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Other,
    ];

    /// Whether a budget can be set for this category.
    pub fn is_budgeted(&self) -> bool {
        Self::BUDGETED.contains(self)
    }
}

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

labelled_enum!(TransactionType, "transaction type", [
    Income => "Income",
    Expense => "Expense",
]);

/// How often an automated payment is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Frequency {
    Weekly,
    Monthly,
    Yearly,
}

labelled_enum!(Frequency, "frequency", [
    Weekly => "Weekly",
    Monthly => "Monthly",
    Yearly => "Yearly",
]);

/// Which way the money of a loan went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanType {
    /// Money lent to someone else.
    Given,
    /// Money borrowed from someone else.
    Taken,
}

labelled_enum!(LoanType, "loan type", [
    Given => "Given",
    Taken => "Taken",
]);

/// An amount of money of at least [Amount::MIN].
///
/// Whether the money came in or went out is recorded separately, e.g. by
/// [TransactionType].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    /// The smallest amount accepted, one cent.
    pub const MIN: f64 = 0.01;

    /// Create an amount.
    ///
    /// # Errors
    ///
    /// Returns [Error::AmountBelowMinimum] if `amount` is less than
    /// [Amount::MIN] or not a finite number.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if amount >= Self::MIN && amount.is_finite() {
            Ok(Self(amount))
        } else {
            Err(Error::AmountBelowMinimum(amount))
        }
    }

    /// The amount in dollars.
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for Amount {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for Amount {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Amount::new(f64::column_result(value)?).map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Check that a budget allocation or savings goal is zero or more.
///
/// # Errors
///
/// Returns [Error::NegativeAmount] if `amount` is negative or not a finite
/// number.
pub fn non_negative(amount: f64) -> Result<f64, Error> {
    if amount >= 0.0 && amount.is_finite() {
        Ok(amount)
    } else {
        Err(Error::NegativeAmount(amount))
    }
}
