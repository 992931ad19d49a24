//! Category breakdowns.
//!
//! Sums amounts per category for one transaction type. The breakdown keeps the
//! order in which categories first appear (pie chart order); [`CategoryBreakdown::ranked`]
//! gives the largest-first table view.

use std::collections::HashMap;

use super::transaction::{Category, Transaction, TransactionType};

/// Total for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category
    pub category: Category,
    /// Sum of amounts
    pub amount: f64,
}

/// One row of the category table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCategory {
    /// The category
    pub category: Category,
    /// Sum of amounts
    pub amount: f64,
    /// Share of the breakdown total, rounded to the nearest whole percent
    pub percent: u32,
    /// Bar length relative to the largest row, 0-100
    pub bar_width: f64,
}

/// Per-category sums in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    /// Entries in first-occurrence order.
    #[must_use]
    pub fn entries(&self) -> &[CategoryTotal] {
        &self.entries
    }

    /// Sum for `category`, `None` when it never occurred.
    #[must_use]
    pub fn get(&self, category: &Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| &e.category == category)
            .map(|e| e.amount)
    }

    /// Number of categories present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no transaction of the type was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Share of `category` in the total, as a whole percent.
    #[must_use]
    pub fn percent_of(&self, category: &Category) -> Option<u32> {
        let total = self.total();
        self.get(category).map(|amount| percent(amount, total))
    }

    /// Entries sorted by amount, largest first, with percentages.
    ///
    /// Ties keep first-occurrence order.
    #[must_use]
    pub fn ranked(&self) -> Vec<RankedCategory> {
        let total = self.total();
        let mut sorted: Vec<&CategoryTotal> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        let max = sorted.first().map_or(0.0, |e| e.amount);

        sorted
            .into_iter()
            .map(|e| RankedCategory {
                category: e.category.clone(),
                amount: e.amount,
                percent: percent(e.amount, total),
                bar_width: if max > 0.0 { e.amount / max * 100.0 } else { 0.0 },
            })
            .collect()
    }

    /// Entries with percentages in first-occurrence order, for the pie legend.
    #[must_use]
    pub fn slices(&self) -> Vec<(&Category, f64, u32)> {
        let total = self.total();
        self.entries
            .iter()
            .map(|e| (&e.category, e.amount, percent(e.amount, total)))
            .collect()
    }
}

/// Sums amounts per category for transactions of type `kind`.
///
/// Transactions of the other type are skipped. Categories that never occur are
/// absent rather than zero.
#[must_use]
pub fn category_breakdown<'a, I>(transactions: I, kind: TransactionType) -> CategoryBreakdown
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut entries: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<Category, usize> = HashMap::new();

    for tx in transactions.into_iter().filter(|t| t.kind == kind) {
        if let Some(&i) = index.get(&tx.category) {
            entries[i].amount += tx.amount;
        } else {
            index.insert(tx.category.clone(), entries.len());
            entries.push(CategoryTotal {
                category: tx.category.clone(),
                amount: tx.amount,
            });
        }
    }

    CategoryBreakdown { entries }
}

/// `amount / total` as a whole percent, rounding half up; 0 when `total` is 0.
#[must_use]
// Cast safety: amount <= total for breakdown entries, so the value is in [0, 100].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent(amount: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    (amount / total * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::filter::{MonthFilter, TypeFilter, filter_transactions};
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_breakdown_sums_per_category() {
        let txs = vec![
            expense("Food", 500.0, date(2024, 2, 1)),
            expense("Food", 300.0, date(2024, 2, 2)),
            expense("Transport", 200.0, date(2024, 2, 3)),
        ];
        let breakdown = category_breakdown(&txs, TransactionType::Expense);

        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown.get(&Category::from("Food")), Some(800.0));
        assert_eq!(breakdown.get(&Category::from("Transport")), Some(200.0));
        assert_eq!(breakdown.percent_of(&Category::from("Food")), Some(80));
        assert_eq!(breakdown.percent_of(&Category::from("Transport")), Some(20));
    }

    #[test]
    fn test_breakdown_ignores_other_type_and_absent_categories() {
        let txs = vec![
            income("Salary", 1000.0, date(2024, 2, 1)),
            expense("Food", 10.0, date(2024, 2, 2)),
        ];
        let breakdown = category_breakdown(&txs, TransactionType::Expense);
        assert_eq!(breakdown.get(&Category::from("Salary")), None);
        assert_eq!(breakdown.get(&Category::from("Travel")), None);
        assert_eq!(breakdown.total(), 10.0);
    }

    #[test]
    fn test_breakdown_total_matches_filtered_expense_total() {
        let txs = vec![
            expense("Food", 12.25, date(2024, 1, 1)),
            expense("Health", 40.5, date(2024, 1, 2)),
            income("Salary", 999.0, date(2024, 1, 3)),
            expense("Food", 7.75, date(2024, 2, 1)),
        ];
        let expenses = filter_transactions(&txs, MonthFilter::All, TransactionType::Expense.into());
        let expected: f64 = expenses.iter().map(|t| t.amount).sum();
        let breakdown = category_breakdown(expenses, TransactionType::Expense);
        assert!((breakdown.total() - expected).abs() < 1e-9);
        assert_eq!(breakdown.get(&Category::from("Food")), Some(20.0));
    }

    #[test]
    fn test_breakdown_keeps_first_occurrence_order() {
        let txs = vec![
            expense("Travel", 10.0, date(2024, 1, 1)),
            expense("Food", 500.0, date(2024, 1, 2)),
            expense("Travel", 5.0, date(2024, 1, 3)),
            expense("Crypto", 1.0, date(2024, 1, 4)),
        ];
        let breakdown = category_breakdown(&txs, TransactionType::Expense);
        let names: Vec<&str> = breakdown.entries().iter().map(|e| e.category.name()).collect();
        assert_eq!(names, ["Travel", "Food", "Crypto"]);
    }

    #[test]
    fn test_unlisted_categories_get_their_own_bucket() {
        let txs = vec![
            expense("Crypto", 3.0, date(2024, 1, 1)),
            expense("Crypto", 4.0, date(2024, 1, 2)),
        ];
        let breakdown = category_breakdown(&txs, TransactionType::Expense);
        assert_eq!(
            breakdown.get(&Category::Unlisted("Crypto".to_string())),
            Some(7.0)
        );
    }

    #[test]
    fn test_ranked_sorts_descending_with_bar_widths() {
        let txs = vec![
            expense("Transport", 200.0, date(2024, 2, 3)),
            expense("Food", 800.0, date(2024, 2, 1)),
        ];
        let ranked = category_breakdown(&txs, TransactionType::Expense).ranked();
        assert_eq!(ranked[0].category, Category::from("Food"));
        assert_eq!(ranked[0].percent, 80);
        assert_eq!(ranked[0].bar_width, 100.0);
        assert_eq!(ranked[1].percent, 20);
        assert_eq!(ranked[1].bar_width, 25.0);
    }

    #[test]
    fn test_slices_follow_entry_order() {
        let txs = vec![
            expense("Transport", 1.0, date(2024, 2, 3)),
            expense("Food", 3.0, date(2024, 2, 1)),
        ];
        let breakdown = category_breakdown(&txs, TransactionType::Expense);
        let slices = breakdown.slices();
        assert_eq!(slices[0].0.name(), "Transport");
        assert_eq!(slices[0].2, 25);
        assert_eq!(slices[1].2, 75);
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown = category_breakdown(&[], TransactionType::Expense);
        assert!(breakdown.is_empty());
        assert_eq!(breakdown.total(), 0.0);
        assert!(breakdown.ranked().is_empty());
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(1.0, 3.0), 33);
        assert_eq!(percent(2.0, 3.0), 67);
        assert_eq!(percent(1.0, 8.0), 13);
        assert_eq!(percent(5.0, 0.0), 0);
    }

    #[test]
    fn test_type_filter_all_still_splits_by_kind() {
        let txs = vec![
            income("Salary", 100.0, date(2024, 1, 1)),
            expense("Food", 10.0, date(2024, 1, 1)),
        ];
        let everything = filter_transactions(&txs, MonthFilter::All, TypeFilter::All);
        let income_breakdown = category_breakdown(everything, TransactionType::Income);
        assert_eq!(income_breakdown.total(), 100.0);
    }
}
