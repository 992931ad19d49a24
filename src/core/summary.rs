//! Summary cards: income, expense and balance over a filtered subset.

use std::fmt;

use super::transaction::{Transaction, TransactionType};

/// Sign of a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// Strictly above zero
    Positive,
    /// Strictly below zero
    Negative,
    /// Exactly zero
    BreakEven,
}

impl BalanceStatus {
    /// Classifies `balance` with no tolerance band.
    #[must_use]
    pub fn of(balance: f64) -> Self {
        if balance > 0.0 {
            Self::Positive
        } else if balance < 0.0 {
            Self::Negative
        } else {
            Self::BreakEven
        }
    }

    /// Badge text.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Positive => "▲ Positive",
            Self::Negative => "▼ Negative",
            Self::BreakEven => "→ Break even",
        }
    }
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.badge())
    }
}

/// Totals for a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    /// Sum of income amounts
    pub income: f64,
    /// Sum of expense amounts
    pub expense: f64,
    /// Number of transactions summarised
    pub count: usize,
}

impl Summary {
    /// `income - expense`.
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }

    /// Sign of the balance.
    #[must_use]
    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::of(self.balance())
    }
}

/// Summarises `transactions`.
#[must_use]
pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Summary::default(), |mut summary, tx| {
            match tx.kind {
                TransactionType::Income => summary.income += tx.amount,
                TransactionType::Expense => summary.expense += tx.amount,
            }
            summary.count += 1;
            summary
        })
}

/// Sum of the amounts of transactions of type `kind`.
#[must_use]
pub fn total_of<'a, I>(transactions: I, kind: TransactionType) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}
