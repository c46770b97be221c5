//! Food item entity - The catalog of orderable food.
//!
//! `available_qty` is the authoritative stock counter: it is decremented by
//! committed orders, incremented by cancellations, and written absolutely by
//! the admin stock procedure. No other code path mutates it. `restrictions`
//! holds dietary tags (e.g. `"vegan"`, `"contains-nuts"`) as a JSON array.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Food item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "food_items")]
pub struct Model {
    /// Unique identifier for the food item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Margherita Pizza")
    pub name: String,
    /// Optional longer description
    pub description: Option<String>,
    /// Unit price; zero means free
    pub price: f64,
    /// Optional image URL for display
    pub image_url: Option<String>,
    /// Authoritative stock counter
    pub available_qty: i32,
    /// Whether the item may currently be ordered
    pub is_active: bool,
    /// Dietary restriction tags as a JSON array of strings
    pub restrictions: Json,
}

impl Model {
    /// Returns the dietary restriction tags as plain strings.
    #[must_use]
    pub fn restriction_tags(&self) -> Vec<String> {
        self.restrictions
            .as_array()
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Defines relationships between FoodItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One food item appears in many event inventories
    #[sea_orm(has_many = "super::inventory_item::Entity")]
    InventoryItems,
    /// One food item appears in many order lines
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryItems.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
