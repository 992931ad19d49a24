//! Entity module - SeaORM entity definitions for the database.
//! The tracker persists everything through a single key-value table.

pub mod local_storage;

pub use local_storage::{
    Column as LocalStorageColumn, Entity as LocalStorage, Model as LocalStorageModel,
};
