//! Food catalog procedures.

use crate::{
    auth::{self, Session},
    core::food::{self, FoodItemUpdate},
    entities::food_item,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Input for [`create_food_item`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateFoodItemInput {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Unit price; zero means free
    pub price: f64,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Initial stock level
    #[serde(default)]
    pub available_qty: i32,
    /// Dietary restriction tags
    #[serde(default)]
    pub restrictions: Vec<String>,
}

/// Input for [`update_food_item`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateFoodItemInput {
    /// Food item to update
    pub id: i64,
    /// Fields to change; omitted fields stay as they are
    #[serde(flatten)]
    pub update: FoodItemUpdate,
}

/// Input for [`update_food_item_stock`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateStockInput {
    /// Food item to restock
    pub id: i64,
    /// New absolute stock level
    pub available_qty: i32,
}

/// Lists the whole catalog, scarcest stock first (public).
pub async fn get_all_food_items(db: &DatabaseConnection) -> Result<Vec<food_item::Model>> {
    food::get_all_food_items(db).await
}

/// Finds a food item by id (public).
pub async fn get_food_item_by_id(
    db: &DatabaseConnection,
    food_item_id: i64,
) -> Result<Option<food_item::Model>> {
    food::get_food_item_by_id(db, food_item_id).await
}

/// Creates a food item (protected, admin).
pub async fn create_food_item(
    db: &DatabaseConnection,
    session: &Session,
    input: CreateFoodItemInput,
) -> Result<food_item::Model> {
    auth::require_admin(session)?;
    food::create_food_item(
        db,
        input.name,
        input.description,
        input.price,
        input.image_url,
        input.available_qty,
        input.restrictions,
    )
    .await
}

/// Updates a food item's fields (protected, admin).
pub async fn update_food_item(
    db: &DatabaseConnection,
    session: &Session,
    input: UpdateFoodItemInput,
) -> Result<food_item::Model> {
    auth::require_admin(session)?;
    food::update_food_item(db, input.id, input.update).await
}

/// Sets a food item's stock to an absolute value (protected, admin).
pub async fn update_food_item_stock(
    db: &DatabaseConnection,
    session: &Session,
    input: UpdateStockInput,
) -> Result<food_item::Model> {
    auth::require_admin(session)?;
    food::update_stock(db, input.id, input.available_qty).await
}

/// Deletes an unreferenced food item (protected, admin).
pub async fn delete_food_item(
    db: &DatabaseConnection,
    session: &Session,
    food_item_id: i64,
) -> Result<()> {
    auth::require_admin(session)?;
    food::delete_food_item(db, food_item_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_food_mutations_require_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = Session::admin(1);
        let team_session = Session::team(1, None);

        let input = CreateFoodItemInput {
            name: "Pizza".to_string(),
            description: None,
            price: 10.0,
            image_url: None,
            available_qty: 5,
            restrictions: Vec::new(),
        };

        let result = create_food_item(&db, &team_session, input.clone()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::PermissionDenied { message: _ }
        ));

        let created = create_food_item(&db, &admin, input).await?;

        let restocked = update_food_item_stock(
            &db,
            &admin,
            UpdateStockInput {
                id: created.id,
                available_qty: 12,
            },
        )
        .await?;
        assert_eq!(restocked.available_qty, 12);

        // Public reads need no session
        assert_eq!(get_all_food_items(&db).await?.len(), 1);
        assert!(get_food_item_by_id(&db, created.id).await?.is_some());

        delete_food_item(&db, &admin, created.id).await?;
        assert!(get_food_item_by_id(&db, created.id).await?.is_none());

        Ok(())
    }
}
