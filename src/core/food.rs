//! Food item business logic - Catalog management and stock adjustment.
//!
//! `update_stock` is the admin's absolute stock write; everything else that
//! touches `available_qty` lives in the order engine (decrement on commit,
//! increment on cancellation). Deletion is restricted while order history or
//! allocations reference the item.

use crate::{
    entities::{FoodItem, InventoryItem, OrderItem, food_item, inventory_item, order_item},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Optional field set for [`update_food_item`]; `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodItemUpdate {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New unit price
    pub price: Option<f64>,
    /// New image URL
    pub image_url: Option<String>,
    /// Activate or deactivate the item
    pub is_active: Option<bool>,
    /// Replace the dietary restriction tags
    pub restrictions: Option<Vec<String>>,
}

fn tags_to_json(tags: Vec<String>) -> Json {
    Json::Array(tags.into_iter().map(Json::String).collect())
}

/// Retrieves the whole catalog, scarcest stock first.
pub async fn get_all_food_items(db: &DatabaseConnection) -> Result<Vec<food_item::Model>> {
    FoodItem::find()
        .order_by_asc(food_item::Column::AvailableQty)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a food item by its unique ID.
pub async fn get_food_item_by_id(
    db: &DatabaseConnection,
    food_item_id: i64,
) -> Result<Option<food_item::Model>> {
    FoodItem::find_by_id(food_item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new food item, active by default.
pub async fn create_food_item(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    price: f64,
    image_url: Option<String>,
    available_qty: i32,
    restrictions: Vec<String>,
) -> Result<food_item::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Food item name cannot be empty".to_string(),
        });
    }
    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }
    if available_qty < 0 {
        return Err(Error::InvalidQuantity {
            quantity: available_qty,
        });
    }

    let food = food_item::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        price: Set(price),
        image_url: Set(image_url),
        available_qty: Set(available_qty),
        is_active: Set(true),
        restrictions: Set(tags_to_json(restrictions)),
        ..Default::default()
    };

    food.insert(db).await.map_err(Into::into)
}

/// Applies the provided fields to an existing food item.
pub async fn update_food_item(
    db: &DatabaseConnection,
    food_item_id: i64,
    update: FoodItemUpdate,
) -> Result<food_item::Model> {
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(Error::Config {
                message: "Food item name cannot be empty".to_string(),
            });
        }
    }
    if let Some(price) = update.price {
        if price < 0.0 || !price.is_finite() {
            return Err(Error::InvalidAmount { amount: price });
        }
    }

    let food = FoodItem::find_by_id(food_item_id)
        .one(db)
        .await?
        .ok_or(Error::FoodItemNotFound { id: food_item_id })?;

    let mut active: food_item::ActiveModel = food.into();
    if let Some(name) = update.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = update.description {
        active.description = Set(Some(description));
    }
    if let Some(price) = update.price {
        active.price = Set(price);
    }
    if let Some(image_url) = update.image_url {
        active.image_url = Set(Some(image_url));
    }
    if let Some(is_active) = update.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(restrictions) = update.restrictions {
        active.restrictions = Set(tags_to_json(restrictions));
    }

    active.update(db).await.map_err(Into::into)
}

/// Sets a food item's stock counter to an absolute value.
///
/// This is the only mutator of `available_qty` outside the order engine.
pub async fn update_stock(
    db: &DatabaseConnection,
    food_item_id: i64,
    available_qty: i32,
) -> Result<food_item::Model> {
    if available_qty < 0 {
        return Err(Error::InvalidQuantity {
            quantity: available_qty,
        });
    }

    let food = FoodItem::find_by_id(food_item_id)
        .one(db)
        .await?
        .ok_or(Error::FoodItemNotFound { id: food_item_id })?;

    let mut active: food_item::ActiveModel = food.into();
    active.available_qty = Set(available_qty);
    let food = active.update(db).await?;
    info!(food_item_id, available_qty, "stock adjusted");

    Ok(food)
}

/// Deletes a food item from the catalog.
///
/// Restricted while any order line references the item
/// ([`Error::FoodItemInUse`]) or while it is still allocated to an event
/// ([`Error::FoodItemAllocated`]); deactivate it instead to hide it from
/// ordering without touching history.
pub async fn delete_food_item(db: &DatabaseConnection, food_item_id: i64) -> Result<()> {
    let food = FoodItem::find_by_id(food_item_id)
        .one(db)
        .await?
        .ok_or(Error::FoodItemNotFound { id: food_item_id })?;

    let referenced = OrderItem::find()
        .filter(order_item::Column::FoodItemId.eq(food_item_id))
        .count(db)
        .await?;
    if referenced > 0 {
        return Err(Error::FoodItemInUse { food_item_id });
    }

    let allocated = InventoryItem::find()
        .filter(inventory_item::Column::FoodItemId.eq(food_item_id))
        .count(db)
        .await?;
    if allocated > 0 {
        return Err(Error::FoodItemAllocated { food_item_id });
    }

    food.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{inventory as inv, order};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_food_item_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            create_food_item(&db, "  ".to_string(), None, 5.0, None, 1, Vec::new()).await;
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));

        let result =
            create_food_item(&db, "Pizza".to_string(), None, -1.0, None, 1, Vec::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidAmount { amount: -1.0 }
        ));

        let result =
            create_food_item(&db, "Pizza".to_string(), None, f64::NAN, None, 1, Vec::new()).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        let result =
            create_food_item(&db, "Pizza".to_string(), None, 5.0, None, -1, Vec::new()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidQuantity { quantity: -1 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_food_item_with_tags() -> Result<()> {
        let db = setup_test_db().await?;

        let food = create_food_item(
            &db,
            "Falafel Wrap".to_string(),
            Some("Chickpea wrap".to_string()),
            7.5,
            Some("https://example.com/falafel.jpg".to_string()),
            20,
            vec!["vegan".to_string(), "contains-gluten".to_string()],
        )
        .await?;

        assert!(food.is_active);
        assert_eq!(food.available_qty, 20);
        assert_eq!(
            food.restriction_tags(),
            vec!["vegan".to_string(), "contains-gluten".to_string()]
        );

        // Zero price means free and is allowed
        let free = create_food_item(&db, "Water".to_string(), None, 0.0, None, 5, Vec::new()).await?;
        assert_eq!(free.price, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_food_item() -> Result<()> {
        let db = setup_test_db().await?;
        let food = create_test_food(&db, "Pizza", 10).await?;

        let updated = update_food_item(
            &db,
            food.id,
            FoodItemUpdate {
                name: Some("Pizza Margherita".to_string()),
                price: Some(12.5),
                is_active: Some(false),
                restrictions: Some(vec!["vegetarian".to_string()]),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.name, "Pizza Margherita");
        assert_eq!(updated.price, 12.5);
        assert!(!updated.is_active);
        assert_eq!(updated.restriction_tags(), vec!["vegetarian".to_string()]);
        // Untouched fields survive
        assert_eq!(updated.available_qty, 10);

        let result = update_food_item(
            &db,
            food.id,
            FoodItemUpdate {
                price: Some(-3.0),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        let result = update_food_item(&db, 9999, FoodItemUpdate::default()).await;
        assert!(matches!(result.unwrap_err(), Error::FoodItemNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_stock_is_absolute() -> Result<()> {
        let db = setup_test_db().await?;
        let food = create_test_food(&db, "Pizza", 10).await?;

        let restocked = update_stock(&db, food.id, 42).await?;
        assert_eq!(restocked.available_qty, 42);

        let result = update_stock(&db, food.id, -1).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidQuantity { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_sorted_by_scarcity() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_food(&db, "Plenty", 50).await?;
        create_test_food(&db, "Scarce", 2).await?;

        let catalog = get_all_food_items(&db).await?;
        assert_eq!(catalog[0].name, "Scarce");
        assert_eq!(catalog[1].name, "Plenty");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_restricted_by_references() -> Result<()> {
        let (db, event_model, team_model, food_model) = setup_order_context().await?;

        // Referenced by an allocation and an order: both restrictions hit,
        // order history first
        order::place_order(
            &db,
            team_model.id,
            event_model.id,
            &[order::OrderLineInput {
                food_item_id: food_model.id,
                quantity: 1,
                price_at_order: 10.0,
            }],
        )
        .await?;

        let result = delete_food_item(&db, food_model.id).await;
        assert!(matches!(result.unwrap_err(), Error::FoodItemInUse { .. }));

        // Allocation-only reference
        let allocated_only = create_test_food(&db, "Allocated Only", 5).await?;
        inv::allocate_food_to_event(&db, event_model.id, allocated_only.id, None).await?;
        let result = delete_food_item(&db, allocated_only.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::FoodItemAllocated { .. }
        ));

        // Unreferenced items delete cleanly
        let loner = create_test_food(&db, "Loner", 5).await?;
        delete_food_item(&db, loner.id).await?;
        assert!(get_food_item_by_id(&db, loner.id).await?.is_none());

        Ok(())
    }
}
