//! Order item entity - One line of a committed order.
//!
//! `price_at_order` is a snapshot of the food item's price at commit time
//! and is never recomputed, so historical orders stay stable when prices
//! change later.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning order
    pub order_id: i64,
    /// Ordered food item
    pub food_item_id: i64,
    /// Ordered quantity, at least 1
    pub quantity: i32,
    /// Unit price snapshot taken when the order was committed
    pub price_at_order: f64,
}

/// Defines relationships between OrderItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one order
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Order,
    /// Each line references one food item
    #[sea_orm(
        belongs_to = "super::food_item::Entity",
        from = "Column::FoodItemId",
        to = "super::food_item::Column::Id"
    )]
    FoodItem,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::food_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FoodItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
