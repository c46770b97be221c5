//! Event business logic - Handles all event-related operations.
//!
//! Events are the time-boxed containers everything else hangs off: teams
//! enroll into an event, food is allocated to it, and orders are placed
//! within its activity window. Deletion is restricted while orders exist so
//! order history is never destroyed implicitly.

use crate::{
    entities::{Event, Inventory, InventoryItem, Order, Team, event, inventory_item, order, team},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use tracing::info;

/// Retrieves all events, most recently starting first.
pub async fn get_all_events(db: &DatabaseConnection) -> Result<Vec<event::Model>> {
    Event::find()
        .order_by_desc(event::Column::StartDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an event by its unique ID.
pub async fn get_event_by_id(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Option<event::Model>> {
    Event::find_by_id(event_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new event after validating its name and activity window.
pub async fn create_event(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<event::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Event name cannot be empty".to_string(),
        });
    }
    if end_date <= start_date {
        return Err(Error::InvalidDateRange);
    }

    let event = event::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        start_date: Set(start_date),
        end_date: Set(end_date),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    event.insert(db).await.map_err(Into::into)
}

/// Updates an event's name, description, and activity window.
pub async fn update_event(
    db: &DatabaseConnection,
    event_id: i64,
    name: String,
    description: Option<String>,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> Result<event::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Event name cannot be empty".to_string(),
        });
    }
    if end_date <= start_date {
        return Err(Error::InvalidDateRange);
    }

    let event = Event::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;

    let mut active: event::ActiveModel = event.into();
    active.name = Set(name.trim().to_string());
    active.description = Set(description);
    active.start_date = Set(start_date);
    active.end_date = Set(end_date);

    active.update(db).await.map_err(Into::into)
}

/// Deletes an event along with its inventory and allocations, leaving its
/// teams unassigned.
///
/// Fails with [`Error::EventHasOrders`] while any order references the
/// event; cancelling or completing orders does not lift the restriction -
/// order history is kept.
pub async fn delete_event(db: &DatabaseConnection, event_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Event::find_by_id(event_id)
        .one(&txn)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;

    let order_count = Order::find()
        .filter(order::Column::EventId.eq(event_id))
        .count(&txn)
        .await?;
    if order_count > 0 {
        return Err(Error::EventHasOrders { event_id });
    }

    // Teams survive the event; they just become unassigned.
    Team::update_many()
        .col_expr(team::Column::EventId, Expr::value(None::<i64>))
        .filter(team::Column::EventId.eq(event_id))
        .exec(&txn)
        .await?;

    if let Some(inventory) = crate::core::inventory::get_inventory_for_event(&txn, event_id).await?
    {
        InventoryItem::delete_many()
            .filter(inventory_item::Column::InventoryId.eq(inventory.id))
            .exec(&txn)
            .await?;
        Inventory::delete_by_id(inventory.id).exec(&txn).await?;
    }

    Event::delete_by_id(event_id).exec(&txn).await?;

    txn.commit().await?;
    info!(event_id, "event deleted");

    Ok(())
}
