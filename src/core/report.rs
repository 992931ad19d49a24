//! Dashboard assembly and text formatting.
//!
//! [`Dashboard::build`] gathers every derived view the screens need (summary cards,
//! recent and full lists, category table, pie data, trend series) in one pass over
//! the store. Nothing is cached: callers rebuild after each mutation. The formatting
//! helpers turn amounts, dates and rows into display strings.

use chrono::NaiveDate;

use super::{
    breakdown::{CategoryBreakdown, RankedCategory, category_breakdown},
    filter::{MonthFilter, TypeFilter, filter_transactions, newest_first, recent_transactions},
    monthly::{DEFAULT_TREND_MONTHS, MonthlyTotals, trend},
    months::{MonthKey, unique_months},
    summary::{Summary, summarize},
    transaction::{Transaction, TransactionType},
};

/// Default length of the recent-transactions list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Filter state and sizes for one dashboard render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Month shown on the overview (cards, recent list, pie)
    pub overview_month: MonthFilter,
    /// Month of the full transaction list
    pub list_month: MonthFilter,
    /// Type of the full transaction list
    pub list_type: TypeFilter,
    /// Month of the analytics view (category table, second pie)
    pub analytics_month: MonthFilter,
    /// Length of the recent list
    pub recent_limit: usize,
    /// Months in the trend series
    pub trend_months: usize,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            overview_month: MonthFilter::All,
            list_month: MonthFilter::All,
            list_type: TypeFilter::All,
            analytics_month: MonthFilter::All,
            recent_limit: DEFAULT_RECENT_LIMIT,
            trend_months: DEFAULT_TREND_MONTHS,
        }
    }
}

/// Every derived view for one render.
#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    /// Filters actually applied (months missing from the data fall back to all)
    pub options: DashboardOptions,
    /// Month picker entries, most recent first
    pub months: Vec<MonthKey>,
    /// Overview cards
    pub summary: Summary,
    /// Latest overview transactions, newest first
    pub recent: Vec<&'a Transaction>,
    /// Full list, newest first
    pub list: Vec<&'a Transaction>,
    /// Overview expense breakdown, first-occurrence order
    pub overview_pie: CategoryBreakdown,
    /// Analytics expense breakdown, first-occurrence order
    pub analytics_pie: CategoryBreakdown,
    /// Analytics category table, largest first
    pub category_table: Vec<RankedCategory>,
    /// Income/expense per month, oldest first
    pub trend: Vec<MonthlyTotals>,
}

impl<'a> Dashboard<'a> {
    /// Computes all views over `transactions`.
    #[must_use]
    pub fn build(transactions: &'a [Transaction], options: &DashboardOptions) -> Self {
        let months = unique_months(transactions);
        let options = DashboardOptions {
            overview_month: available(options.overview_month, &months),
            list_month: available(options.list_month, &months),
            analytics_month: available(options.analytics_month, &months),
            ..*options
        };

        let overview = filter_transactions(transactions, options.overview_month, TypeFilter::All);
        let summary = summarize(overview.iter().copied());
        let overview_pie = category_breakdown(overview, TransactionType::Expense);

        let analytics_expenses = filter_transactions(
            transactions,
            options.analytics_month,
            TransactionType::Expense.into(),
        );
        let analytics_pie = category_breakdown(analytics_expenses, TransactionType::Expense);
        let category_table = analytics_pie.ranked();

        Self {
            options,
            months,
            summary,
            recent: recent_transactions(
                transactions,
                options.overview_month,
                options.recent_limit,
            ),
            list: newest_first(transactions, options.list_month, options.list_type),
            overview_pie,
            analytics_pie,
            category_table,
            trend: trend(transactions, options.trend_months),
        }
    }

    /// Plain-text rendering for terminals and logs.
    #[must_use]
    pub fn render(&self, currency: &str) -> String {
        let summary = &self.summary;

        let mut out = format!("FinTrack - {}\n", self.options.overview_month.label());
        out.push_str(&format!(
            "  Balance       {:>16}  {}\n",
            format_balance(summary.balance(), currency),
            summary.status()
        ));
        out.push_str(&format!(
            "  Income        {:>16}\n",
            format_amount(summary.income, currency)
        ));
        out.push_str(&format!(
            "  Expense       {:>16}\n",
            format_amount(summary.expense, currency)
        ));
        out.push_str(&format!("  Transactions  {:>16}\n", summary.count));

        out.push_str("\nRecent transactions\n");
        if self.recent.is_empty() {
            out.push_str("  No transactions in this period.\n");
        }
        for tx in &self.recent {
            out.push_str(&format!("  {}\n", format_transaction_line(tx, currency)));
        }

        out.push_str(&format!(
            "\nSpending by category ({})\n",
            self.options.analytics_month.label()
        ));
        if self.category_table.is_empty() {
            out.push_str("  No expense data.\n");
        }
        for row in &self.category_table {
            out.push_str(&format!(
                "  {:<14} {} {:>16} {:>4}%\n",
                row.category.name(),
                format_bar(row.bar_width, None),
                format_amount(row.amount, currency),
                row.percent
            ));
        }

        out.push_str("\nIncome vs expense\n");
        for month in &self.trend {
            out.push_str(&format!(
                "  {:<9} +{:>16}  -{:>16}\n",
                month.month.label(),
                format_amount(month.income, currency),
                format_amount(month.expense, currency)
            ));
        }

        out
    }
}

fn available(filter: MonthFilter, months: &[MonthKey]) -> MonthFilter {
    match filter {
        MonthFilter::Month(month) if !months.contains(&month) => MonthFilter::All,
        other => other,
    }
}

/// Formats an amount as `currency` + absolute value with Indian digit grouping.
///
/// `format_amount(123456.5, "Rs.")` gives `Rs.1,23,456.50`.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{currency}{}.{fraction}", group_indian(whole))
}

/// Like [`format_amount`] but keeps a leading `-` for negative balances.
#[must_use]
pub fn format_balance(balance: f64, currency: &str) -> String {
    let formatted = format_amount(balance, currency);
    if balance < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = vec![tail];
    while head.len() > 2 {
        let (rest, pair) = head.split_at(head.len() - 2);
        groups.push(pair);
        head = rest;
    }
    groups.push(head);
    groups.reverse();
    groups.join(",")
}

/// Formats a date as `5 Mar 2024`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// One list row: icon, description, category, date and signed amount.
#[must_use]
pub fn format_transaction_line(tx: &Transaction, currency: &str) -> String {
    format!(
        "{} {} · {} · {}  {}{}",
        tx.category.icon(tx.kind),
        tx.description,
        tx.category,
        format_date(tx.date),
        tx.kind.sign(),
        format_amount(tx.amount, currency)
    )
}

/// Text bar such as `[████████░░]` for a 0-100 fill.
#[must_use]
pub fn format_bar(fill_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = fill_percent.clamp(0.0, 100.0);

    // Cast safety: clamped is in [0, 100] and length is small, so the result is in [0, length].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
