//! Team credential entity - Per-team issued credentials managed by admins.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team credential database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_credentials")]
pub struct Model {
    /// Unique identifier for the credential
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Team the credential was issued to
    pub team_id: i64,
    /// Issued email, if any
    pub email: Option<String>,
    /// Issued password, if any
    pub password: Option<String>,
    /// When the credential was issued
    pub created_at: DateTimeUtc,
}

/// Defines relationships between TeamCredential and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each credential belongs to one team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
