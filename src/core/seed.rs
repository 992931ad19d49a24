//! Demo data for a fresh install.
//!
//! When the store comes up empty the binary fills it with ten sample entries from
//! the last two weeks so every view has something to show.

use chrono::{Days, NaiveDate};
use tracing::info;

use super::{
    store::TransactionStore,
    transaction::{NewTransaction, TransactionType},
};
use crate::{errors::Result, storage::KeyValueStore};

struct SeedEntry {
    kind: TransactionType,
    description: &'static str,
    amount: f64,
    category: &'static str,
    days_ago: u64,
}

#[rustfmt::skip]
const SEED: [SeedEntry; 10] = [
    SeedEntry { kind: TransactionType::Income, description: "Monthly Salary", amount: 85000.0, category: "Salary", days_ago: 1 },
    SeedEntry { kind: TransactionType::Expense, description: "Rent", amount: 22000.0, category: "Housing", days_ago: 2 },
    SeedEntry { kind: TransactionType::Expense, description: "Grocery Shopping", amount: 4500.0, category: "Food", days_ago: 3 },
    SeedEntry { kind: TransactionType::Income, description: "Freelance Project", amount: 15000.0, category: "Freelance", days_ago: 5 },
    SeedEntry { kind: TransactionType::Expense, description: "Netflix & Spotify", amount: 999.0, category: "Entertainment", days_ago: 6 },
    SeedEntry { kind: TransactionType::Expense, description: "Electricity Bill", amount: 2200.0, category: "Utilities", days_ago: 8 },
    SeedEntry { kind: TransactionType::Expense, description: "Gym Membership", amount: 1800.0, category: "Health", days_ago: 10 },
    SeedEntry { kind: TransactionType::Expense, description: "Uber Rides", amount: 2300.0, category: "Transport", days_ago: 12 },
    SeedEntry { kind: TransactionType::Income, description: "Dividend Payout", amount: 3400.0, category: "Investment", days_ago: 14 },
    SeedEntry { kind: TransactionType::Expense, description: "Online Courses", amount: 3999.0, category: "Education", days_ago: 15 },
];

/// Sample transactions dated relative to `today`.
#[must_use]
pub fn demo_transactions(today: NaiveDate) -> Vec<NewTransaction> {
    SEED.iter()
        .map(|entry| NewTransaction {
            description: entry.description.to_string(),
            amount: entry.amount,
            date: today.checked_sub_days(Days::new(entry.days_ago)),
            kind: entry.kind,
            category: entry.category.into(),
        })
        .collect()
}

/// Seeds `store` with demo data if, and only if, it is empty.
///
/// Returns the number of transactions added.
pub async fn seed_if_empty<S: KeyValueStore>(
    store: &mut TransactionStore<S>,
    today: NaiveDate,
) -> Result<usize> {
    if !store.is_empty() {
        return Ok(0);
    }
    let added = store.add_all(demo_transactions(today)).await?;
    info!("Seeded {} demo transaction(s)", added);
    Ok(added)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::transaction::Category;
    use crate::test_utils::{date, new_expense, open_memory_store};

    #[test]
    fn test_demo_transactions_use_listed_categories() {
        let demo = demo_transactions(date(2024, 3, 20));
        assert_eq!(demo.len(), 10);
        for entry in &demo {
            assert_eq!(entry.category.listed_type(), Some(entry.kind));
            assert!(entry.clone().into_transaction("x".to_string()).is_ok());
        }
    }

    #[test]
    fn test_demo_dates_are_relative_to_today() {
        let demo = demo_transactions(date(2024, 3, 20));
        assert_eq!(demo[0].date, Some(date(2024, 3, 19)));
        assert_eq!(demo[9].date, Some(date(2024, 3, 5)));
        assert_eq!(demo[0].category, Category::from("Salary"));
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() -> Result<()> {
        let mut store = open_memory_store().await?;
        assert_eq!(seed_if_empty(&mut store, date(2024, 3, 20)).await?, 10);
        assert_eq!(seed_if_empty(&mut store, date(2024, 3, 20)).await?, 0);
        assert_eq!(store.len(), 10);

        let mut other = open_memory_store().await?;
        other.add(new_expense("Food", 1.0, date(2024, 1, 1))).await?;
        assert_eq!(seed_if_empty(&mut other, date(2024, 3, 20)).await?, 0);
        assert_eq!(other.len(), 1);
        Ok(())
    }
}
