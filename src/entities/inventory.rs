//! Inventory entity - The per-event container for food allocations.
//!
//! One inventory per event (`event_id` is unique), created lazily when the
//! first food item is allocated to the event.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventories")]
pub struct Model {
    /// Unique identifier for the inventory
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning event; at most one inventory per event
    #[sea_orm(unique)]
    pub event_id: i64,
    /// When the inventory was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Inventory and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each inventory belongs to one event
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Event,
    /// One inventory has many allocated items
    #[sea_orm(has_many = "super::inventory_item::Entity")]
    InventoryItems,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
