//! Inventory item entity - "This food item is orderable within this event."
//!
//! Each row allocates one food item to one event's inventory, with an
//! optional per-team order ceiling (`max_order_per_team`; unbounded when
//! null). The (`inventory_id`, `food_item_id`) pair is unique - the
//! allocation service checks for an existing pair before inserting.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Unique identifier for the allocation
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning inventory
    pub inventory_id: i64,
    /// Allocated food item
    pub food_item_id: i64,
    /// Cumulative per-team order ceiling; None means unbounded
    pub max_order_per_team: Option<i32>,
}

/// Defines relationships between InventoryItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each allocation belongs to one inventory
    #[sea_orm(
        belongs_to = "super::inventory::Entity",
        from = "Column::InventoryId",
        to = "super::inventory::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Inventory,
    /// Each allocation references one food item
    #[sea_orm(
        belongs_to = "super::food_item::Entity",
        from = "Column::FoodItemId",
        to = "super::food_item::Column::Id"
    )]
    FoodItem,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::food_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
