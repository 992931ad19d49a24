//! Monthly income/expense series for the trend chart.

use super::{
    filter::filter_transactions,
    months::{MonthKey, recent_months},
    summary::total_of,
    transaction::{Transaction, TransactionType},
};

/// Default number of months in the trend window.
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Income and expense totals for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotals {
    /// The month
    pub month: MonthKey,
    /// Sum of income amounts in the month
    pub income: f64,
    /// Sum of expense amounts in the month
    pub expense: f64,
}

/// Totals for each of `months`, in the order given.
///
/// A month without transactions yields zero for both series.
#[must_use]
pub fn monthly_totals(transactions: &[Transaction], months: &[MonthKey]) -> Vec<MonthlyTotals> {
    months
        .iter()
        .map(|&month| MonthlyTotals {
            month,
            income: month_total(transactions, month, TransactionType::Income),
            expense: month_total(transactions, month, TransactionType::Expense),
        })
        .collect()
}

/// Totals for the `window` most recent months present, oldest first.
#[must_use]
pub fn trend(transactions: &[Transaction], window: usize) -> Vec<MonthlyTotals> {
    let months = recent_months(transactions, window);
    monthly_totals(transactions, &months)
}

fn month_total(transactions: &[Transaction], month: MonthKey, kind: TransactionType) -> f64 {
    total_of(
        filter_transactions(transactions, month.into(), kind.into()),
        kind,
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp, clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_trend_sums_each_month() {
        let txs = vec![
            income("Salary", 1000.0, date(2024, 1, 5)),
            expense("Food", 400.0, date(2024, 1, 10)),
            expense("Food", 100.0, date(2024, 1, 20)),
            income("Gift", 50.0, date(2024, 2, 1)),
        ];
        let series = trend(&txs, DEFAULT_TREND_MONTHS);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].month.to_string(), "2024-01");
        assert_eq!(series[0].income, 1000.0);
        assert_eq!(series[0].expense, 500.0);
        assert_eq!(series[1].month.to_string(), "2024-02");
        assert_eq!(series[1].income, 50.0);
        assert_eq!(series[1].expense, 0.0);
    }

    #[test]
    fn test_explicit_empty_month_is_zero() {
        let txs = vec![income("Salary", 1000.0, date(2024, 1, 5))];
        let march = MonthKey::new(2024, 3).unwrap();
        let totals = monthly_totals(&txs, &[march]);
        assert_eq!(
            totals,
            [MonthlyTotals {
                month: march,
                income: 0.0,
                expense: 0.0
            }]
        );
    }

    #[test]
    fn test_trend_window_limits_months() {
        let txs: Vec<_> = (1..=9)
            .map(|m| expense("Food", f64::from(m), date(2023, m, 15)))
            .collect();
        let series = trend(&txs, 6);
        let months: Vec<u32> = series.iter().map(|t| t.month.month()).collect();
        assert_eq!(months, [4, 5, 6, 7, 8, 9]);
        assert_eq!(series[5].expense, 9.0);
    }

    #[test]
    fn test_trend_empty_store() {
        assert!(trend(&[], DEFAULT_TREND_MONTHS).is_empty());
    }
}
