//! Core engine - framework-agnostic transaction store and aggregation.
//!
//! Everything here except [`store`], [`seed`] and [`preferences`] is a pure function
//! of the transaction list; those three talk to a [`crate::storage::KeyValueStore`].

/// Category sums and percentages
pub mod breakdown;
/// Month and type predicates
pub mod filter;
/// Per-month income/expense series
pub mod monthly;
/// Month keys and distinct-month listing
pub mod months;
/// Theme preference
pub mod preferences;
/// Dashboard assembly and display formatting
pub mod report;
/// Demo data
pub mod seed;
/// The persisted transaction collection
pub mod store;
/// Income/expense/balance totals
pub mod summary;
/// Transaction data model
pub mod transaction;

pub use store::TransactionStore;
pub use transaction::{Category, NewTransaction, Transaction, TransactionType};
