//! Transaction data model.
//!
//! A transaction is an immutable income or expense record. Categories are a closed
//! enumeration per transaction type with an `Unlisted` fallback, so records carrying
//! a category name outside the entry-form lists (hand-edited or imported data) keep
//! their name verbatim and still aggregate and render.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::months::MonthKey;

/// Which side of the ledger a transaction sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received
    Income,
    /// Money spent
    Expense,
}

impl TransactionType {
    /// Both types, income first.
    pub const ALL: [Self; 2] = [Self::Income, Self::Expense];

    /// Wire name, as stored in the snapshot (`"income"` / `"expense"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Sign shown in front of amounts in transaction lists.
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }

    /// Icon used when the category has no icon of its own for this type.
    #[must_use]
    pub const fn fallback_icon(self) -> &'static str {
        match self {
            Self::Income => "💰",
            Self::Expense => "📦",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Rejection::Malformed {
                reason: format!("unknown transaction type '{other}'"),
            }),
        }
    }
}

/// Categories offered for income entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeCategory {
    /// Regular employment income
    Salary,
    /// Contract and gig work
    Freelance,
    /// Dividends, interest, gains
    Investment,
    /// Rent received
    Rental,
    /// Gifts received
    Gift,
    /// Anything else
    OtherIncome,
}

impl IncomeCategory {
    /// Entry-form order.
    pub const ALL: [Self; 6] = [
        Self::Salary,
        Self::Freelance,
        Self::Investment,
        Self::Rental,
        Self::Gift,
        Self::OtherIncome,
    ];

    /// Display and storage name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Investment => "Investment",
            Self::Rental => "Rental",
            Self::Gift => "Gift",
            Self::OtherIncome => "Other Income",
        }
    }

    /// List icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Salary => "💼",
            Self::Freelance => "💻",
            Self::Investment => "📈",
            Self::Rental => "🏠",
            Self::Gift => "🎁",
            Self::OtherIncome => "💰",
        }
    }
}

/// Categories offered for expense entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    /// Groceries and eating out
    Food,
    /// Fuel, fares, rides
    Transport,
    /// Rent and home costs
    Housing,
    /// Power, water, internet
    Utilities,
    /// Subscriptions and outings
    Entertainment,
    /// Medical and fitness
    Health,
    /// General purchases
    Shopping,
    /// Courses and books
    Education,
    /// Trips
    Travel,
    /// Anything else
    Other,
}

impl ExpenseCategory {
    /// Entry-form order.
    pub const ALL: [Self; 10] = [
        Self::Food,
        Self::Transport,
        Self::Housing,
        Self::Utilities,
        Self::Entertainment,
        Self::Health,
        Self::Shopping,
        Self::Education,
        Self::Travel,
        Self::Other,
    ];

    /// Display and storage name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Housing => "Housing",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// List icon.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Food => "🍔",
            Self::Transport => "🚗",
            Self::Housing => "🏡",
            Self::Utilities => "⚡",
            Self::Entertainment => "🎬",
            Self::Health => "💊",
            Self::Shopping => "🛍️",
            Self::Education => "📚",
            Self::Travel => "✈️",
            Self::Other => "📦",
        }
    }
}

/// A transaction category.
///
/// Serialised as its plain name. Names outside both lists deserialise to
/// [`Category::Unlisted`] and serialise back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    /// One of the income list entries
    Income(IncomeCategory),
    /// One of the expense list entries
    Expense(ExpenseCategory),
    /// A name that is on neither list
    Unlisted(String),
}

impl Category {
    /// Categories offered by the entry form for the given type.
    #[must_use]
    pub fn listed_for(kind: TransactionType) -> Vec<Self> {
        match kind {
            TransactionType::Income => IncomeCategory::ALL.into_iter().map(Self::Income).collect(),
            TransactionType::Expense => ExpenseCategory::ALL
                .into_iter()
                .map(Self::Expense)
                .collect(),
        }
    }

    /// Display and storage name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Income(c) => c.name(),
            Self::Expense(c) => c.name(),
            Self::Unlisted(name) => name,
        }
    }

    /// The list this category belongs to, if any.
    #[must_use]
    pub const fn listed_type(&self) -> Option<TransactionType> {
        match self {
            Self::Income(_) => Some(TransactionType::Income),
            Self::Expense(_) => Some(TransactionType::Expense),
            Self::Unlisted(_) => None,
        }
    }

    /// Icon for a transaction of type `kind` carrying this category.
    ///
    /// A category only uses its own icon under its own type; an income record
    /// tagged `Food` shows the income fallback.
    #[must_use]
    pub const fn icon(&self, kind: TransactionType) -> &'static str {
        match (self, kind) {
            (Self::Income(c), TransactionType::Income) => c.icon(),
            (Self::Expense(c), TransactionType::Expense) => c.icon(),
            _ => kind.fallback_icon(),
        }
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        if let Some(c) = IncomeCategory::ALL.into_iter().find(|c| c.name() == name) {
            return Self::Income(c);
        }
        if let Some(c) = ExpenseCategory::ALL.into_iter().find(|c| c.name() == name) {
            return Self::Expense(c);
        }
        Self::Unlisted(name.to_string())
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Unlisted(_) => Self::Unlisted(name),
            listed => listed,
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Unlisted(name) => name,
            listed => listed.name().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored income or expense record.
///
/// Field order and names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque unique handle, assigned at creation
    pub id: String,
    /// Free-text label
    pub description: String,
    /// Positive amount in the implied currency
    pub amount: f64,
    /// Calendar date, `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Category name, listed or not
    pub category: Category,
}

impl Transaction {
    /// Month this transaction falls in.
    #[must_use]
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Checks the invariants a loaded record must satisfy.
    ///
    /// The description is not re-checked here; it is only required to be
    /// non-empty when the transaction is first entered.
    pub fn check(&self) -> Result<(), Rejection> {
        if self.id.trim().is_empty() {
            return Err(Rejection::EmptyId);
        }
        check_amount(self.amount)
    }
}

/// User input for a new transaction, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Free-text label, must not be blank
    pub description: String,
    /// Must be finite and greater than zero
    pub amount: f64,
    /// Must be present
    pub date: Option<NaiveDate>,
    /// Income or expense
    pub kind: TransactionType,
    /// Chosen category
    pub category: Category,
}

impl NewTransaction {
    /// Builds input for a dated entry.
    #[must_use]
    pub fn new(
        kind: TransactionType,
        description: impl Into<String>,
        amount: f64,
        date: NaiveDate,
        category: impl Into<Category>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date: Some(date),
            kind,
            category: category.into(),
        }
    }

    /// Validates the input and attaches `id`, producing a stored record.
    ///
    /// The description is trimmed.
    pub fn into_transaction(self, id: String) -> Result<Transaction, Rejection> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(Rejection::EmptyDescription);
        }
        check_amount(self.amount)?;
        let date = self.date.ok_or(Rejection::MissingDate)?;

        Ok(Transaction {
            id,
            description: description.to_string(),
            amount: self.amount,
            date,
            kind: self.kind,
            category: self.category,
        })
    }
}

fn check_amount(amount: f64) -> Result<(), Rejection> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Rejection::NonPositiveAmount { amount })
    }
}

/// Why a record was refused at the boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// Description empty or whitespace
    #[error("description is empty")]
    EmptyDescription,

    /// Zero, negative or non-finite amount
    #[error("amount {amount} is not positive")]
    NonPositiveAmount {
        /// The rejected amount
        amount: f64,
    },

    /// No date given
    #[error("date is missing")]
    MissingDate,

    /// Loaded record without an id
    #[error("id is empty")]
    EmptyId,

    /// Loaded record reusing an id seen earlier in the snapshot
    #[error("duplicate id '{id}'")]
    DuplicateId {
        /// The repeated id
        id: String,
    },

    /// Record with the wrong shape
    #[error("malformed record: {reason}")]
    Malformed {
        /// Parser message
        reason: String,
    },
}
