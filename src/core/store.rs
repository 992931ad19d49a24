//! Transaction store - the single owned collection of transactions.
//!
//! The store is loaded once from a [`KeyValueStore`] backend, keeps transactions in
//! insertion order, and writes a full JSON snapshot back after every mutation.
//! Loading never fails on bad data: a snapshot that is not a JSON array is treated as
//! an empty store, and individual records that do not parse are kept aside and
//! written back untouched, so a load/persist cycle never erases stored data.

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use super::transaction::{NewTransaction, Rejection, Transaction};
use crate::{errors::Result, storage::KeyValueStore};

/// Key holding the transaction snapshot.
pub const DATA_KEY: &str = "ft_data";

/// Key used by earlier releases; migrated into [`DATA_KEY`] on open.
pub const LEGACY_DATA_KEY: &str = "ft_transactions";

/// Time-based id source, unique within the process.
///
/// Ids are millisecond timestamps, bumped past the last issued value when two
/// are requested in the same millisecond.
#[derive(Debug, Default)]
pub struct IdSource {
    last: i64,
}

impl IdSource {
    /// Next id.
    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}

/// Ordered, persisted collection of transactions.
#[derive(Debug)]
pub struct TransactionStore<S> {
    backend: S,
    transactions: Vec<Transaction>,
    retained: Vec<Value>,
    ids: IdSource,
}

/// A parsed snapshot.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Snapshot {
    /// Records that validated, in stored order
    pub transactions: Vec<Transaction>,
    /// Array elements that did not validate, verbatim
    pub retained: Vec<Value>,
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Opens the store: migrates the legacy key, then loads the snapshot.
    ///
    /// Absent or malformed data yields an empty store. Only backend failures
    /// are returned as errors.
    #[instrument(skip(backend))]
    pub async fn open(mut backend: S) -> Result<Self> {
        migrate_legacy_key(&mut backend).await?;

        let Snapshot {
            transactions,
            retained,
        } = match backend.get(DATA_KEY).await? {
            Some(raw) => read_snapshot(&raw),
            None => {
                debug!("No snapshot under '{}', starting empty", DATA_KEY);
                Snapshot::default()
            }
        };
        info!(
            "Loaded {} transaction(s), {} unreadable record(s) kept aside",
            transactions.len(),
            retained.len()
        );

        Ok(Self {
            backend,
            transactions,
            retained,
            ids: IdSource::default(),
        })
    }

    /// All transactions in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of stored transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the store holds no transactions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Stored records that could not be loaded; written back on every persist.
    #[must_use]
    pub fn retained(&self) -> &[Value] {
        &self.retained
    }

    /// Transaction with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// The persistence backend, for other keys such as preferences.
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.backend
    }

    /// Mutable access to the persistence backend.
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Validates `new`, appends it with a fresh id and persists.
    ///
    /// Invalid input (blank description, non-positive amount, missing date) is
    /// dropped and `Ok(None)` returned; the store is left untouched.
    pub async fn add(&mut self, new: NewTransaction) -> Result<Option<&Transaction>> {
        if !self.append(new) {
            return Ok(None);
        }
        self.persist().await?;
        Ok(self.transactions.last())
    }

    /// Appends every valid entry of `batch`, then persists once.
    ///
    /// Returns how many entries were added.
    pub async fn add_all(
        &mut self,
        batch: impl IntoIterator<Item = NewTransaction>,
    ) -> Result<usize> {
        let mut added = 0;
        for new in batch {
            if self.append(new) {
                added += 1;
            }
        }
        if added > 0 {
            self.persist().await?;
        }
        Ok(added)
    }

    /// Removes the transaction with `id` and persists.
    ///
    /// Returns `false`, without touching storage, when no transaction has that id.
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(position) = self.transactions.iter().position(|t| t.id == id) else {
            debug!("Delete of unknown id '{}' ignored", id);
            return Ok(false);
        };
        let removed = self.transactions.remove(position);
        debug!("Deleted transaction {} ({})", removed.id, removed.description);
        self.persist().await?;
        Ok(true)
    }

    /// Writes the full snapshot under [`DATA_KEY`].
    ///
    /// Retained records follow the transactions unchanged.
    pub async fn persist(&mut self) -> Result<()> {
        let mut records = self
            .transactions
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;
        records.extend(self.retained.iter().cloned());

        let snapshot = serde_json::to_string(&records)?;
        self.backend.set(DATA_KEY, &snapshot).await?;
        debug!(
            "Persisted {} transaction(s) and {} retained record(s)",
            self.transactions.len(),
            self.retained.len()
        );
        Ok(())
    }

    /// Final persist; hands the backend back to the caller.
    pub async fn close(mut self) -> Result<S> {
        self.persist().await?;
        Ok(self.backend)
    }

    fn append(&mut self, new: NewTransaction) -> bool {
        let mut id = self.ids.next_id();
        while self.get(&id).is_some() {
            id = self.ids.next_id();
        }
        match new.into_transaction(id) {
            Ok(tx) => {
                debug!("Added {} {} ({})", tx.kind, tx.amount, tx.id);
                self.transactions.push(tx);
                true
            }
            Err(reason) => {
                debug!("Rejected new transaction: {}", reason);
                false
            }
        }
    }
}

/// Copies a non-empty legacy snapshot to [`DATA_KEY`] and removes the legacy key.
///
/// Corrupt or empty legacy data is discarded.
pub async fn migrate_legacy_key<S: KeyValueStore>(backend: &mut S) -> Result<()> {
    let Some(raw) = backend.get(LEGACY_DATA_KEY).await? else {
        return Ok(());
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) if !items.is_empty() => {
            backend.set(DATA_KEY, &raw).await?;
            info!(
                "Migrated {} record(s) from '{}' to '{}'",
                items.len(),
                LEGACY_DATA_KEY,
                DATA_KEY
            );
        }
        Ok(_) => debug!("Legacy key '{}' held no records", LEGACY_DATA_KEY),
        Err(e) => warn!("Discarding unreadable legacy data: {}", e),
    }

    backend.remove(LEGACY_DATA_KEY).await
}

/// Parses a snapshot, separating valid transactions from unreadable records.
///
/// Not JSON, or JSON that is not an array, gives an empty snapshot. Within an array
/// each record is checked on its own; a duplicate id keeps the first record.
#[must_use]
pub fn read_snapshot(raw: &str) -> Snapshot {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(other) => {
            warn!("Snapshot is not an array ({}), starting empty", json_kind(&other));
            return Snapshot::default();
        }
        Err(e) => {
            warn!("Snapshot is not valid JSON ({}), starting empty", e);
            return Snapshot::default();
        }
    };

    let mut snapshot = Snapshot::default();
    let mut seen = HashSet::new();
    for (index, item) in items.into_iter().enumerate() {
        match parse_record(&item, &mut seen) {
            Ok(tx) => snapshot.transactions.push(tx),
            Err(reason) => {
                warn!("Keeping unreadable record #{} aside: {}", index, reason);
                snapshot.retained.push(item);
            }
        }
    }
    snapshot
}

/// The valid transactions of a snapshot.
#[must_use]
pub fn parse_snapshot(raw: &str) -> Vec<Transaction> {
    read_snapshot(raw).transactions
}

fn parse_record(
    item: &Value,
    seen: &mut HashSet<String>,
) -> std::result::Result<Transaction, Rejection> {
    let tx = Transaction::deserialize(item).map_err(|e| Rejection::Malformed {
        reason: e.to_string(),
    })?;
    tx.check()?;
    if !seen.insert(tx.id.clone()) {
        return Err(Rejection::DuplicateId { id: tx.id });
    }
    Ok(tx)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
