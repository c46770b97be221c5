//! Inventory allocation service - Exposes food items to events.
//!
//! An event's inventory is created lazily on its first allocation. Each
//! allocation optionally carries `max_order_per_team`, the cumulative
//! ceiling a single team may order of that item across all of its
//! non-cancelled orders within the event. [`team_ordered_total`] is the
//! aggregate read the order engine enforces that ceiling with.

use crate::{
    entities::{
        Event, FoodItem, Inventory, InventoryItem, OrderItem, food_item, inventory, inventory_item,
        order::{self, OrderStatus},
        order_item,
    },
    errors::{Error, Result},
};
use sea_orm::{
    DatabaseConnection, JoinType, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*,
};

/// An allocation together with its food-item detail.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedItem {
    /// The allocation row
    pub allocation: inventory_item::Model,
    /// The allocated food item
    pub food_item: food_item::Model,
}

/// Finds the inventory record for an event, if one exists.
pub async fn get_inventory_for_event<C>(db: &C, event_id: i64) -> Result<Option<inventory::Model>>
where
    C: ConnectionTrait,
{
    Inventory::find()
        .filter(inventory::Column::EventId.eq(event_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the event's inventory, creating it on first use.
async fn get_or_create_inventory<C>(db: &C, event_id: i64) -> Result<inventory::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = get_inventory_for_event(db, event_id).await? {
        return Ok(existing);
    }

    inventory::ActiveModel {
        event_id: Set(event_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Allocates a food item to an event, with an optional per-team cap.
///
/// Creates the event's inventory lazily. Fails with
/// [`Error::AlreadyAllocated`] if the (event, food item) pair already has an
/// allocation - a food item cannot be allocated twice to the same event.
pub async fn allocate_food_to_event(
    db: &DatabaseConnection,
    event_id: i64,
    food_item_id: i64,
    max_order_per_team: Option<i32>,
) -> Result<AllocatedItem> {
    if let Some(cap) = max_order_per_team {
        if cap < 1 {
            return Err(Error::InvalidQuantity { quantity: cap });
        }
    }

    Event::find_by_id(event_id)
        .one(db)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;
    let food = FoodItem::find_by_id(food_item_id)
        .one(db)
        .await?
        .ok_or(Error::FoodItemNotFound { id: food_item_id })?;

    let txn = db.begin().await?;

    let inventory = get_or_create_inventory(&txn, event_id).await?;

    let existing = InventoryItem::find()
        .filter(inventory_item::Column::InventoryId.eq(inventory.id))
        .filter(inventory_item::Column::FoodItemId.eq(food_item_id))
        .one(&txn)
        .await?;
    if existing.is_some() {
        return Err(Error::AlreadyAllocated {
            event_id,
            food_item_id,
        });
    }

    let allocation = inventory_item::ActiveModel {
        inventory_id: Set(inventory.id),
        food_item_id: Set(food_item_id),
        max_order_per_team: Set(max_order_per_team),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok(AllocatedItem {
        allocation,
        food_item: food,
    })
}

/// Replaces an allocation's per-team cap (None removes the ceiling).
pub async fn update_allocation_cap(
    db: &DatabaseConnection,
    inventory_item_id: i64,
    max_order_per_team: Option<i32>,
) -> Result<AllocatedItem> {
    if let Some(cap) = max_order_per_team {
        if cap < 1 {
            return Err(Error::InvalidQuantity { quantity: cap });
        }
    }

    let item = InventoryItem::find_by_id(inventory_item_id)
        .one(db)
        .await?
        .ok_or(Error::InventoryItemNotFound {
            id: inventory_item_id,
        })?;

    let food_item_id = item.food_item_id;
    let mut active: inventory_item::ActiveModel = item.into();
    active.max_order_per_team = Set(max_order_per_team);
    let allocation = active.update(db).await?;

    let food = FoodItem::find_by_id(food_item_id)
        .one(db)
        .await?
        .ok_or(Error::FoodItemNotFound { id: food_item_id })?;

    Ok(AllocatedItem {
        allocation,
        food_item: food,
    })
}

/// Removes an allocation from its event.
///
/// Orders already placed against the allocation are unaffected: order lines
/// carry their own quantity and price snapshot and do not depend on the
/// allocation surviving.
pub async fn deallocate(db: &DatabaseConnection, inventory_item_id: i64) -> Result<()> {
    let item = InventoryItem::find_by_id(inventory_item_id)
        .one(db)
        .await?
        .ok_or(Error::InventoryItemNotFound {
            id: inventory_item_id,
        })?;

    item.delete(db).await?;
    Ok(())
}

/// Lists an event's allocations with food detail; empty if the event has no
/// inventory yet.
pub async fn get_event_food_items(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Vec<AllocatedItem>> {
    let Some(inventory) = get_inventory_for_event(db, event_id).await? else {
        return Ok(Vec::new());
    };

    let items = InventoryItem::find()
        .filter(inventory_item::Column::InventoryId.eq(inventory.id))
        .all(db)
        .await?;

    let mut allocated = Vec::with_capacity(items.len());
    for item in items {
        let food = FoodItem::find_by_id(item.food_item_id)
            .one(db)
            .await?
            .ok_or(Error::FoodItemNotFound {
                id: item.food_item_id,
            })?;
        allocated.push(AllocatedItem {
            allocation: item,
            food_item: food,
        });
    }
    Ok(allocated)
}

/// Lists active food items not yet allocated to the event - the admin's
/// candidate pool when extending an event's menu.
pub async fn get_available_food_items(
    db: &DatabaseConnection,
    event_id: i64,
) -> Result<Vec<food_item::Model>> {
    let allocated_ids: Vec<i64> = match get_inventory_for_event(db, event_id).await? {
        Some(inventory) => InventoryItem::find()
            .filter(inventory_item::Column::InventoryId.eq(inventory.id))
            .all(db)
            .await?
            .into_iter()
            .map(|item| item.food_item_id)
            .collect(),
        None => Vec::new(),
    };

    let mut query = FoodItem::find().filter(food_item::Column::IsActive.eq(true));
    if !allocated_ids.is_empty() {
        query = query.filter(food_item::Column::Id.is_not_in(allocated_ids));
    }
    query
        .order_by_asc(food_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the quantities a team has ordered of one food item within an event,
/// across all of its non-cancelled orders.
///
/// Runs against whatever connection the caller holds; the order engine calls
/// it inside its own transaction so the read participates in the same atomic
/// unit as the decrement it guards.
pub async fn team_ordered_total<C>(
    db: &C,
    team_id: i64,
    event_id: i64,
    food_item_id: i64,
) -> Result<i64>
where
    C: ConnectionTrait,
{
    let total: Option<Option<i64>> = OrderItem::find()
        .select_only()
        .column_as(order_item::Column::Quantity.sum(), "total")
        .join(JoinType::InnerJoin, order_item::Relation::Order.def())
        .filter(order::Column::TeamId.eq(team_id))
        .filter(order::Column::EventId.eq(event_id))
        .filter(order_item::Column::FoodItemId.eq(food_item_id))
        .filter(order::Column::OrderStatus.ne(OrderStatus::Cancelled))
        .into_tuple()
        .one(db)
        .await?;

    Ok(total.flatten().unwrap_or(0))
}
