//! User entity - Admin accounts.
//!
//! Credentials are checked by the external auth tier; the stored hash is
//! opaque to this crate.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin user database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the admin
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Unique login name
    #[sea_orm(unique)]
    pub username: String,
    /// Optional contact email
    pub email: Option<String>,
    /// Opaque password hash issued by the auth tier
    pub password_hash: String,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Admin users have no owned relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
