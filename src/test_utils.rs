//! Shared test utilities for `FeastBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{event, food, inventory, team},
    entities,
    errors::Result,
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test event whose ordering window is currently open
/// (one hour in each direction).
pub async fn create_test_event(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::event::Model> {
    let now = Utc::now();
    create_custom_event(db, name, now - Duration::hours(1), now + Duration::hours(1)).await
}

/// Creates a test event with an explicit ordering window.
/// Use this to test window enforcement (future or past events).
pub async fn create_custom_event(
    db: &DatabaseConnection,
    name: &str,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<entities::event::Model> {
    event::create_event(db, name.to_string(), None, start_date, end_date).await
}

/// Creates a test team, optionally enrolled in an event.
///
/// The username is derived from the name (lowercased, spaces replaced), so
/// distinct names give distinct usernames.
pub async fn create_test_team(
    db: &DatabaseConnection,
    name: &str,
    event_id: Option<i64>,
) -> Result<entities::team::Model> {
    let username = name.to_lowercase().replace(' ', "-");
    team::create_team(
        db,
        name.to_string(),
        username,
        "test-hash".to_string(),
        event_id,
    )
    .await
}

/// Creates a test food item with the given stock level.
///
/// # Defaults
/// * `price`: 10.0
/// * `description`, `image_url`: None
/// * `restrictions`: empty
pub async fn create_test_food(
    db: &DatabaseConnection,
    name: &str,
    available_qty: i32,
) -> Result<entities::food_item::Model> {
    food::create_food_item(
        db,
        name.to_string(),
        None,
        10.0,
        None,
        available_qty,
        Vec::new(),
    )
    .await
}

/// Allocates a food item to an event with an optional per-team cap.
pub async fn allocate_test_food(
    db: &DatabaseConnection,
    event_id: i64,
    food_item_id: i64,
    max_order_per_team: Option<i32>,
) -> Result<inventory::AllocatedItem> {
    inventory::allocate_food_to_event(db, event_id, food_item_id, max_order_per_team).await
}

/// Sets up a complete ordering environment: an active event, a team enrolled
/// in it, and a food item (stock 10, price 10.0) allocated with no cap.
/// Returns (db, event, team, food) for common order-engine scenarios.
pub async fn setup_order_context() -> Result<(
    DatabaseConnection,
    entities::event::Model,
    entities::team::Model,
    entities::food_item::Model,
)> {
    let db = setup_test_db().await?;
    let event_model = create_test_event(&db, "Test Event").await?;
    let team_model = create_test_team(&db, "Test Team", Some(event_model.id)).await?;
    let food_model = create_test_food(&db, "Test Food", 10).await?;
    allocate_test_food(&db, event_model.id, food_model.id, None).await?;
    Ok((db, event_model, team_model, food_model))
}
