//! Event procedures - CRUD and the inventory-allocation surface.

use crate::{
    auth::{self, Session},
    core::{
        event,
        inventory::{self, AllocatedItem},
    },
    entities::{event as event_entity, food_item},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Input for [`create`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEventInput {
    /// Event name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// When ordering opens
    pub start_date: DateTime<Utc>,
    /// When ordering closes
    pub end_date: DateTime<Utc>,
}

/// Input for [`update`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateEventInput {
    /// Event to update
    pub id: i64,
    /// New name
    pub name: String,
    /// New description
    pub description: Option<String>,
    /// New window start
    pub start_date: DateTime<Utc>,
    /// New window end
    pub end_date: DateTime<Utc>,
}

/// Input for [`add_food_to_event`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddFoodToEventInput {
    /// Target event
    pub event_id: i64,
    /// Food item to allocate
    pub food_item_id: i64,
    /// Optional cumulative per-team order ceiling
    pub max_order_per_team: Option<i32>,
}

/// Input for [`update_inventory_item`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateInventoryItemInput {
    /// Allocation to update
    pub inventory_item_id: i64,
    /// Replacement cap; None removes the ceiling
    pub max_order_per_team: Option<i32>,
}

/// Finds an event by id (public).
pub async fn get_by_id(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Option<event_entity::Model>> {
    event::get_event_by_id(db, event_id).await
}

/// Lists all events (public).
pub async fn get_all_events(db: &DatabaseConnection) -> Result<Vec<event_entity::Model>> {
    event::get_all_events(db).await
}

/// Creates an event (protected, admin).
pub async fn create(
    db: &DatabaseConnection,
    session: &Session,
    input: CreateEventInput,
) -> Result<event_entity::Model> {
    auth::require_admin(session)?;
    event::create_event(
        db,
        input.name,
        input.description,
        input.start_date,
        input.end_date,
    )
    .await
}

/// Updates an event (protected, admin).
pub async fn update(
    db: &DatabaseConnection,
    session: &Session,
    input: UpdateEventInput,
) -> Result<event_entity::Model> {
    auth::require_admin(session)?;
    event::update_event(
        db,
        input.id,
        input.name,
        input.description,
        input.start_date,
        input.end_date,
    )
    .await
}

/// Deletes an event without orders (protected, admin).
pub async fn delete(db: &DatabaseConnection, session: &Session, event_id: i64) -> Result<()> {
    auth::require_admin(session)?;
    event::delete_event(db, event_id).await
}

/// Lists an event's allocations with food detail (public).
pub async fn get_event_food_items(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Vec<AllocatedItem>> {
    inventory::get_event_food_items(db, event_id).await
}

/// Lists active food items not yet allocated to the event (public).
pub async fn get_available_food_items(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Vec<food_item::Model>> {
    inventory::get_available_food_items(db, event_id).await
}

/// Allocates a food item to an event (protected, admin).
pub async fn add_food_to_event(
    db: &DatabaseConnection,
    session: &Session,
    input: AddFoodToEventInput,
) -> Result<AllocatedItem> {
    auth::require_admin(session)?;
    inventory::allocate_food_to_event(
        db,
        input.event_id,
        input.food_item_id,
        input.max_order_per_team,
    )
    .await
}

/// Replaces an allocation's per-team cap (protected, admin).
pub async fn update_inventory_item(
    db: &DatabaseConnection,
    session: &Session,
    input: UpdateInventoryItemInput,
) -> Result<AllocatedItem> {
    auth::require_admin(session)?;
    inventory::update_allocation_cap(db, input.inventory_item_id, input.max_order_per_team).await
}

/// Removes an allocation from an event (protected, admin).
pub async fn remove_food_from_event(
    db: &DatabaseConnection,
    session: &Session,
    inventory_item_id: i64,
) -> Result<()> {
    auth::require_admin(session)?;
    inventory::deallocate(db, inventory_item_id).await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_event_mutations_require_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();
        let input = CreateEventInput {
            name: "Gated Event".to_string(),
            description: None,
            start_date: now,
            end_date: now + Duration::hours(1),
        };

        let team_session = Session::team(1, None);
        let result = create(&db, &team_session, input.clone()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::PermissionDenied { message: _ }
        ));

        let admin = Session::admin(1);
        let created = create(&db, &admin, input).await?;
        assert_eq!(created.name, "Gated Event");

        let food_model = create_test_food(&db, "Pizza", 5).await?;
        let result = add_food_to_event(
            &db,
            &team_session,
            AddFoodToEventInput {
                event_id: created.id,
                food_item_id: food_model.id,
                max_order_per_team: None,
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::PermissionDenied { message: _ }
        ));

        let allocated = add_food_to_event(
            &db,
            &admin,
            AddFoodToEventInput {
                event_id: created.id,
                food_item_id: food_model.id,
                max_order_per_team: Some(2),
            },
        )
        .await?;
        assert_eq!(allocated.allocation.max_order_per_team, Some(2));

        // Public reads need no session
        assert_eq!(get_event_food_items(&db, created.id).await?.len(), 1);
        assert_eq!(get_available_food_items(&db, created.id).await?.len(), 0);

        Ok(())
    }
}
