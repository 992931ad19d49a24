//! Persistent key-value storage.
//!
//! The tracker keeps its whole state as a handful of string values under fixed
//! keys. Backends only need synchronous-looking get/set/remove with single-key
//! atomicity; there are no transactions across keys.

use std::future::Future;

use crate::errors::Result;

/// In-memory backend
pub mod memory;

/// `SQLite` backend on the `local_storage` table
pub mod database;

pub use database::DatabaseStore;
pub use memory::MemoryStore;

/// A string-to-string store that survives restarts.
pub trait KeyValueStore {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> impl Future<Output = Result<()>> + Send;
}
