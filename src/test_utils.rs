//! Shared test utilities for `FinTrack`.
//!
//! Builders for transactions with sensible defaults, plus store and database
//! setup helpers.

use crate::{
    core::{
        store::TransactionStore,
        transaction::{Category, NewTransaction, Transaction, TransactionType},
    },
    errors::Result,
    storage::MemoryStore,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Opens a transaction store on an empty in-memory backend.
pub async fn open_memory_store() -> Result<TransactionStore<MemoryStore>> {
    TransactionStore::open(MemoryStore::new()).await
}

/// Shorthand for a valid calendar date.
///
/// # Panics
/// Panics on an impossible date; only used with literals.
#[allow(clippy::expect_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Stored income record with an empty id and description `"<category> income"`.
pub fn income(category: &str, amount: f64, date: NaiveDate) -> Transaction {
    transaction(TransactionType::Income, category, amount, date)
}

/// Stored expense record with an empty id and description `"<category> purchase"`.
pub fn expense(category: &str, amount: f64, date: NaiveDate) -> Transaction {
    transaction(TransactionType::Expense, category, amount, date)
}

fn transaction(kind: TransactionType, category: &str, amount: f64, date: NaiveDate) -> Transaction {
    let suffix = match kind {
        TransactionType::Income => "income",
        TransactionType::Expense => "purchase",
    };
    Transaction {
        id: String::new(),
        description: format!("{category} {suffix}"),
        amount,
        date,
        kind,
        category: Category::from(category),
    }
}

/// Assigns ids `t0`, `t1`, ... in order.
pub fn with_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions
        .into_iter()
        .enumerate()
        .map(|(i, mut tx)| {
            tx.id = format!("t{i}");
            tx
        })
        .collect()
}

/// Entry-form input for an income.
pub fn new_income(category: &str, amount: f64, date: NaiveDate) -> NewTransaction {
    NewTransaction::new(
        TransactionType::Income,
        format!("{category} income"),
        amount,
        date,
        category,
    )
}

/// Entry-form input for an expense.
pub fn new_expense(category: &str, amount: f64, date: NaiveDate) -> NewTransaction {
    NewTransaction::new(
        TransactionType::Expense,
        format!("{category} purchase"),
        amount,
        date,
        category,
    )
}
