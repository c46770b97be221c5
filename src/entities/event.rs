//! Event entity - Represents a time-boxed food-ordering event.
//!
//! Each event has a name, optional description, and an activity window
//! (`start_date`..`end_date`) during which enrolled teams may place orders.
//! An event owns at most one inventory and is referenced by teams and orders.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name of the event (e.g., "Hackathon 2026")
    pub name: String,
    /// Optional longer description shown to teams
    pub description: Option<String>,
    /// When ordering opens
    pub start_date: DateTimeUtc,
    /// When ordering closes
    pub end_date: DateTimeUtc,
    /// When the event was created
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Whether the event's ordering window contains `now` (inclusive on both ends).
    #[must_use]
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

/// Defines relationships between Event and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One event has many enrolled teams
    #[sea_orm(has_many = "super::team::Entity")]
    Teams,
    /// One event has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// Each event owns at most one inventory
    #[sea_orm(has_one = "super::inventory::Entity")]
    Inventory,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
