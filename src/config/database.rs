//! Database configuration module for `FinTrack`.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! The only table is the key-value `local_storage` table, created from its entity
//! definition with `Schema::create_table_from_entity` so the schema always matches
//! the Rust model.

use crate::entities::LocalStorage;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/fintrack.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable,
/// falling back to a local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the configured `SQLite` database.
///
/// The parent directory of a file-backed database is created on demand so a
/// fresh checkout can start without manual setup.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    ensure_parent_dir(&database_url)?;
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the `local_storage` table if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut local_storage_table = schema.create_table_from_entity(LocalStorage);
    local_storage_table.if_not_exists();

    db.execute(builder.build(&local_storage_table)).await?;
    info!("Database tables ready.");

    Ok(())
}

fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = std::path::Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
