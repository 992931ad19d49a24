/// Database configuration and connection management
pub mod database;

/// Dashboard settings loading from config.toml
pub mod settings;
