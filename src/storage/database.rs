//! `SQLite` key-value backend.
//!
//! Each key is one row of the `local_storage` table. `set` is an upsert on the
//! unique key column, so a snapshot write replaces the previous snapshot in a
//! single statement.

use chrono::Utc;
use sea_orm::{Set, prelude::*};
use tracing::{debug, instrument, trace};

use super::KeyValueStore;
use crate::{
    entities::{LocalStorage, local_storage},
    errors::Result,
};

/// Key-value store backed by the `local_storage` table.
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    /// Wraps a connection whose tables already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn find(&self, key: &str) -> Result<Option<local_storage::Model>> {
        LocalStorage::find()
            .filter(local_storage::Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }
}

impl KeyValueStore for DatabaseStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self.find(key).await?.map(|row| row.value);
        trace!("Read {} bytes", value.as_ref().map_or(0, String::len));
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now().naive_utc();

        if let Some(row) = self.find(key).await? {
            let mut active_model: local_storage::ActiveModel = row.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_row = local_storage::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_row.insert(&self.db).await?;
        }

        debug!("Stored {} bytes", value.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&mut self, key: &str) -> Result<()> {
        let result = LocalStorage::delete_many()
            .filter(local_storage::Column::Key.eq(key))
            .exec(&self.db)
            .await?;
        debug!("Removed {} row(s)", result.rows_affected);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{init_test_tracing, setup_test_db};

    #[tokio::test]
    async fn test_set_and_get_new_key() -> Result<()> {
        init_test_tracing();
        let mut store = DatabaseStore::new(setup_test_db().await?);

        store.set("ft_theme", "dark").await?;

        assert_eq!(store.get("ft_theme").await?, Some("dark".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_set_updates_existing_key() -> Result<()> {
        init_test_tracing();
        let mut store = DatabaseStore::new(setup_test_db().await?);

        store.set("ft_data", "[]").await?;
        store.set("ft_data", r#"[{"id":"1"}]"#).await?;

        assert_eq!(
            store.get("ft_data").await?,
            Some(r#"[{"id":"1"}]"#.to_string())
        );
        let rows = LocalStorage::find().all(store.connection()).await?;
        assert_eq!(rows.len(), 1, "upsert must not duplicate keys");
        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_existent_key() -> Result<()> {
        let store = DatabaseStore::new(setup_test_db().await?);
        assert!(store.get("missing").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_key() -> Result<()> {
        let mut store = DatabaseStore::new(setup_test_db().await?);
        store.set("ft_transactions", "[]").await?;
        store.set("ft_data", "[]").await?;

        store.remove("ft_transactions").await?;
        store.remove("never_set").await?;

        assert!(store.get("ft_transactions").await?.is_none());
        assert_eq!(store.get("ft_data").await?, Some("[]".to_string()));
        Ok(())
    }
}
