//! Local storage entity - One row per key of the persisted key-value store.
//!
//! The transaction snapshot (`ft_data`), the legacy snapshot key and the theme
//! preference all live here as opaque string values.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Local storage database model - stores one key-value pair
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "local_storage")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Storage key (e.g., `"ft_data"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Stored value, usually a JSON document
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this key was last written
    pub updated_at: DateTime,
}

/// `LocalStorage` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
