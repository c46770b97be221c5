//! Team entity - A participating team that logs in and places orders.
//!
//! A team belongs to at most one event at a time (`event_id` is nullable;
//! an unassigned team cannot order). Usernames are globally unique. The
//! stored password hash is produced by the external auth tier and treated
//! as opaque here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Team database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Unique identifier for the team
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the team
    pub name: String,
    /// Globally unique login name
    #[sea_orm(unique)]
    pub username: String,
    /// Opaque password hash issued by the auth tier
    pub password_hash: String,
    /// Event the team is currently assigned to, if any
    pub event_id: Option<i64>,
    /// When the team was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Team and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each team belongs to at most one event
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
    /// One team has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One team has many issued credentials
    #[sea_orm(has_many = "super::team_credential::Entity")]
    Credentials,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::team_credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Credentials.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
