//! Quick link entity - Admin-curated dashboard links with an active toggle.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quick link database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quick_links")]
pub struct Model {
    /// Unique identifier for the link
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Short title shown on the dashboard
    pub title: String,
    /// One-line description
    pub description: String,
    /// Target URL
    pub url: String,
    /// Whether the link is currently shown to teams
    pub active: bool,
    /// When the link was created
    pub created_at: DateTimeUtc,
}

/// Quick links have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
