//! Dashboard aggregates over teams, events, and allocations.

use crate::{
    core::inventory::get_inventory_for_event,
    entities::{Event, InventoryItem, Order, Team, inventory_item, order, team},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, QuerySelect, prelude::*};

/// Team participation counters for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamStats {
    /// All teams known to the system
    pub total_teams: u64,
    /// Teams that have placed at least one order
    pub teams_with_orders: u64,
}

/// Per-event counters for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStats {
    /// Orders placed within the event
    pub order_count: u64,
    /// Teams currently enrolled
    pub team_count: u64,
    /// Food items allocated to the event
    pub food_item_count: u64,
}

/// Computes team participation counters.
pub async fn team_stats(db: &DatabaseConnection) -> Result<TeamStats> {
    let total_teams = Team::find().count(db).await?;
    let teams_with_orders = Order::find()
        .select_only()
        .column(order::Column::TeamId)
        .distinct()
        .count(db)
        .await?;

    Ok(TeamStats {
        total_teams,
        teams_with_orders,
    })
}

/// Computes an event's dashboard counters.
pub async fn event_stats(db: &DatabaseConnection, event_id: i64) -> Result<EventStats> {
    Event::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;

    let order_count = Order::find()
        .filter(order::Column::EventId.eq(event_id))
        .count(db)
        .await?;
    let team_count = Team::find()
        .filter(team::Column::EventId.eq(event_id))
        .count(db)
        .await?;
    let food_item_count = match get_inventory_for_event(db, event_id).await? {
        Some(inventory) => {
            InventoryItem::find()
                .filter(inventory_item::Column::InventoryId.eq(inventory.id))
                .count(db)
                .await?
        }
        None => 0,
    };

    Ok(EventStats {
        order_count,
        team_count,
        food_item_count,
    })
}
