//! Transaction filtering.
//!
//! Filters never reorder: results come back in store (insertion) order, oldest
//! entry first. Views that want newest-first reverse the result themselves.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    months::MonthKey,
    transaction::{Transaction, TransactionType},
};
use crate::errors::{Error, Result};

/// Sentinel that disables a predicate.
pub const ALL: &str = "all";

/// Month predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MonthFilter {
    /// Every month
    #[default]
    All,
    /// A single month
    Month(MonthKey),
}

impl MonthFilter {
    /// Whether `transaction` passes this predicate.
    #[must_use]
    pub fn matches(self, transaction: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Month(month) => month.contains(transaction.date),
        }
    }

    /// Label for month pickers.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::All => "All time".to_string(),
            Self::Month(month) => month.label(),
        }
    }
}

impl From<MonthKey> for MonthFilter {
    fn from(month: MonthKey) -> Self {
        Self::Month(month)
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Month(month) => write!(f, "{month}"),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == ALL {
            return Ok(Self::All);
        }
        s.parse::<MonthKey>()
            .map(Self::Month)
            .map_err(|_| Error::InvalidFilter {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for MonthFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthFilter> for String {
    fn from(filter: MonthFilter) -> Self {
        filter.to_string()
    }
}

/// Type predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    /// Income and expense
    #[default]
    All,
    /// One side only
    Only(TransactionType),
}

impl TypeFilter {
    /// Whether `transaction` passes this predicate.
    #[must_use]
    pub fn matches(self, transaction: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Only(kind) => transaction.kind == kind,
        }
    }
}

impl From<TransactionType> for TypeFilter {
    fn from(kind: TransactionType) -> Self {
        Self::Only(kind)
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == ALL {
            return Ok(Self::All);
        }
        s.parse::<TransactionType>()
            .map(Self::Only)
            .map_err(|_| Error::InvalidFilter {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}

/// Transactions matching both the month and the type predicate, in store order.
#[must_use]
pub fn filter_transactions(
    transactions: &[Transaction],
    month: MonthFilter,
    kind: TypeFilter,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| month.matches(t) && kind.matches(t))
        .collect()
}

/// The last `limit` transactions of `month`, newest first.
#[must_use]
pub fn recent_transactions(
    transactions: &[Transaction],
    month: MonthFilter,
    limit: usize,
) -> Vec<&Transaction> {
    let filtered = filter_transactions(transactions, month, TypeFilter::All);
    filtered.into_iter().rev().take(limit).collect()
}

/// Every matching transaction, newest first.
#[must_use]
pub fn newest_first(
    transactions: &[Transaction],
    month: MonthFilter,
    kind: TypeFilter,
) -> Vec<&Transaction> {
    let mut filtered = filter_transactions(transactions, month, kind);
    filtered.reverse();
    filtered
}
