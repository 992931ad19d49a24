//! Month keys.
//!
//! A month key is the year and month of a transaction date, written `YYYY-MM`.
//! The distinct months present in the store drive the month filter options and
//! the trend chart window.

use chrono::{Datelike, NaiveDate};
use std::{collections::BTreeSet, fmt, str::FromStr};

use super::transaction::Transaction;
use crate::errors::{Error, Result};

/// Truncates a raw `YYYY-MM-DD` date string to its month key.
///
/// Takes the first seven characters; shorter input is returned whole and an
/// empty date gives an empty key.
#[must_use]
pub fn month_key(date: &str) -> &str {
    date.char_indices().nth(7).map_or(date, |(i, _)| &date[..i])
}

/// Calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` unless `month` is in `1..=12`.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month >= 1 && month <= 12 {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Month number, 1-based.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Whether `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Short label such as `Mar 2024`.
    #[must_use]
    pub fn label(self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map_or_else(|| self.to_string(), |d| d.format("%b %Y").to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidMonthKey {
            value: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// Distinct months present in `transactions`, most recent first.
#[must_use]
pub fn unique_months(transactions: &[Transaction]) -> Vec<MonthKey> {
    transactions
        .iter()
        .map(Transaction::month_key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .collect()
}

/// The `count` most recent months present, oldest first.
///
/// Fewer months are returned when the store spans fewer; gaps are not filled.
#[must_use]
pub fn recent_months(transactions: &[Transaction], count: usize) -> Vec<MonthKey> {
    let mut months: Vec<MonthKey> = unique_months(transactions).into_iter().take(count).collect();
    months.reverse();
    months
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_month_key_truncates_to_seven_chars() {
        assert_eq!(month_key("2024-03-15"), "2024-03");
        assert_eq!(month_key("2024-03"), "2024-03");
        assert_eq!(month_key("2024"), "2024");
        assert_eq!(month_key(""), "");
    }

    #[test]
    fn test_month_key_type_matches_string_truncation() {
        let d = date(2023, 11, 30);
        let raw = d.format("%Y-%m-%d").to_string();
        assert_eq!(MonthKey::from_date(d).to_string(), month_key(&raw));
    }

    #[test]
    fn test_parse_month_key() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert_eq!((key.year(), key.month()), (2024, 3));
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("2024-3".parse::<MonthKey>().is_err());
        assert!("all".parse::<MonthKey>().is_err());
        assert!("".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(MonthKey::new(2024, 3).unwrap().label(), "Mar 2024");
        assert_eq!(MonthKey::new(2023, 12).unwrap().label(), "Dec 2023");
    }

    #[test]
    fn test_unique_months_sorted_descending_without_duplicates() {
        let txs = vec![
            income("Salary", 100.0, date(2024, 1, 5)),
            expense("Food", 10.0, date(2024, 3, 2)),
            expense("Food", 20.0, date(2024, 1, 20)),
            expense("Travel", 30.0, date(2023, 12, 31)),
            income("Gift", 5.0, date(2024, 3, 9)),
        ];
        let months: Vec<String> = unique_months(&txs).iter().map(ToString::to_string).collect();
        assert_eq!(months, ["2024-03", "2024-01", "2023-12"]);
    }

    #[test]
    fn test_unique_months_empty_store() {
        assert!(unique_months(&[]).is_empty());
    }

    #[test]
    fn test_recent_months_ascending_and_not_padded() {
        let txs = vec![
            expense("Food", 1.0, date(2024, 1, 1)),
            expense("Food", 1.0, date(2024, 4, 1)),
            expense("Food", 1.0, date(2024, 2, 1)),
        ];
        let months: Vec<String> = recent_months(&txs, 6).iter().map(ToString::to_string).collect();
        assert_eq!(months, ["2024-01", "2024-02", "2024-04"]);
    }

    #[test]
    fn test_recent_months_keeps_latest_window() {
        let txs: Vec<_> = (1..=8)
            .map(|m| expense("Food", 1.0, date(2024, m, 1)))
            .collect();
        let months: Vec<u32> = recent_months(&txs, 6).iter().map(|m| m.month()).collect();
        assert_eq!(months, [3, 4, 5, 6, 7, 8]);
    }
}
