use thiserror::Error;

/// Unified error type for the tracker.
///
/// Engine queries never fail; only persistence and configuration do.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Database-level failure from the `SQLite` backend
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON encoding failure while writing a snapshot
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A month key that is not `YYYY-MM`
    #[error("Invalid month key: '{value}'")]
    InvalidMonthKey {
        /// The rejected input
        value: String,
    },

    /// A filter value that is neither `all` nor a recognised value
    #[error("Invalid filter: '{value}'")]
    InvalidFilter {
        /// The rejected input
        value: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
