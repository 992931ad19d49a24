//! Dashboard settings loaded from `config.toml`.
//!
//! Every field is optional; a missing file means all defaults. The file location
//! can be overridden with the `FINTRACK_CONFIG` environment variable.

use crate::{
    core::{
        filter::{MonthFilter, TypeFilter},
        monthly::DEFAULT_TREND_MONTHS,
        report::{DEFAULT_RECENT_LIMIT, DashboardOptions},
    },
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const MAX_TREND_MONTHS: usize = 12;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for formatted amounts
    pub currency_symbol: String,
    /// Length of the recent-transactions list
    pub recent_limit: usize,
    /// Months in the trend chart, clamped to 1..=12
    pub trend_months: usize,
    /// Fill an empty store with sample data on startup
    pub seed_demo_data: bool,
    /// Initial filter selections
    pub filters: FilterSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "Rs.".to_string(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            trend_months: DEFAULT_TREND_MONTHS,
            seed_demo_data: true,
            filters: FilterSettings::default(),
        }
    }
}

/// Filter selections for each view; each accepts `"all"` or a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Overview month (`"all"` or `"YYYY-MM"`)
    pub dashboard: MonthFilter,
    /// Transaction list month
    pub transactions: MonthFilter,
    /// Analytics month
    pub analytics: MonthFilter,
    /// Transaction list type (`"all"`, `"income"` or `"expense"`)
    pub transaction_type: TypeFilter,
}

impl Settings {
    /// Options for [`crate::core::report::Dashboard::build`].
    #[must_use]
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            overview_month: self.filters.dashboard,
            list_month: self.filters.transactions,
            list_type: self.filters.transaction_type,
            analytics_month: self.filters.analytics,
            recent_limit: self.recent_limit,
            trend_months: self.trend_months.clamp(1, MAX_TREND_MONTHS),
        }
    }
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })
}

/// Loads settings from `path`; a missing file yields defaults.
///
/// # Errors
/// Returns `Error::Config` if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No settings file at {:?}, using defaults", path);
            return Ok(Settings::default());
        }
        Err(e) => {
            return Err(Error::Config {
                message: format!("Failed to read settings file {path:?}: {e}"),
            });
        }
    };
    debug!("Loaded settings from {:?}", path);
    parse_settings(&contents)
}

/// Loads settings from `FINTRACK_CONFIG`, or `./config.toml` when unset.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("FINTRACK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_settings(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::transaction::TransactionType;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            currency_symbol = "$"
            recent_limit = 3
            trend_months = 4
            seed_demo_data = false

            [filters]
            dashboard = "2024-03"
            transactions = "all"
            analytics = "2024-02"
            transaction_type = "expense"
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.recent_limit, 3);
        assert!(!settings.seed_demo_data);
        assert_eq!(settings.filters.dashboard.to_string(), "2024-03");
        assert_eq!(settings.filters.transactions, MonthFilter::All);
        assert_eq!(
            settings.filters.transaction_type,
            TypeFilter::Only(TransactionType::Expense)
        );
        assert_eq!(settings.dashboard_options().trend_months, 4);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.currency_symbol, "Rs.");
        assert_eq!(settings.dashboard_options(), DashboardOptions::default());
    }

    #[test]
    fn test_invalid_filter_is_config_error() {
        let result = parse_settings("[filters]\ndashboard = \"March\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_trend_months_are_clamped() {
        let settings = parse_settings("trend_months = 40").unwrap();
        assert_eq!(settings.dashboard_options().trend_months, 12);
        let settings = parse_settings("trend_months = 0").unwrap();
        assert_eq!(settings.dashboard_options().trend_months, 1);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = load_settings("definitely/not/here/config.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
