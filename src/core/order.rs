//! Order transaction engine - Validates and commits team food orders.
//!
//! [`place_order`] is the only code path that creates orders. It checks team
//! enrollment, the event's activity window, inventory allocation, stock, and
//! per-team caps, then commits the order, its lines, and the stock decrements
//! as one transaction. Stock decrements are conditional updates
//! (`available_qty = available_qty - q WHERE available_qty >= q`), so two
//! orders racing on the same scarce item can never jointly oversell: the
//! loser's update matches zero rows and its whole transaction rolls back.
//! Cancellation restores stock with the same atomicity.

use crate::{
    core::inventory::team_ordered_total,
    entities::{
        Event, FoodItem, Inventory, InventoryItem, Order, OrderItem, Team, food_item, inventory,
        inventory_item,
        order::{self, OrderStatus, PaymentStatus},
        order_item,
    },
    errors::{Error, Result},
};
use sea_orm::{
    ActiveEnum, DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// One requested line of a new order.
///
/// `price_at_order` is the price snapshot the caller saw when building the
/// order; it is stored as-is and never recomputed from the current food-item
/// price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineInput {
    /// Food item to order
    pub food_item_id: i64,
    /// Requested quantity, at least 1
    pub quantity: i32,
    /// Unit price snapshot
    pub price_at_order: f64,
}

/// A committed order line together with its food-item detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineDetail {
    /// The stored line
    pub item: order_item::Model,
    /// The referenced food item, for immediate display
    pub food_item: food_item::Model,
}

/// An order with its lines and food-item detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    /// The order row
    pub order: order::Model,
    /// Its lines, with food detail
    pub items: Vec<OrderLineDetail>,
}

/// Validates and commits a team's order as a single atomic unit.
///
/// Preconditions are checked in order, each failing fast with a distinct
/// error and no side effects: team enrollment in the event, the event's
/// activity window, inventory existence, and per line allocation, active
/// flag, stock, and per-team cap. The commit phase then creates the order
/// and its lines and decrements stock; every step runs inside one
/// transaction, so a failure at any point leaves no partial order behind.
///
/// The per-team cap is cumulative: the team's quantities across all of its
/// non-cancelled orders for that food item within the event, plus the new
/// request, must stay within the allocation's cap.
pub async fn place_order(
    db: &DatabaseConnection,
    team_id: i64,
    event_id: i64,
    lines: &[OrderLineInput],
) -> Result<OrderDetails> {
    if lines.is_empty() {
        return Err(Error::EmptyOrder);
    }
    for line in lines {
        if line.quantity < 1 {
            return Err(Error::InvalidQuantity {
                quantity: line.quantity,
            });
        }
        if !line.price_at_order.is_finite() || line.price_at_order < 0.0 {
            return Err(Error::InvalidAmount {
                amount: line.price_at_order,
            });
        }
    }

    // Use a transaction so the validation reads and the mutating writes form
    // one atomic unit; an early return before commit rolls everything back.
    let txn = db.begin().await?;

    let team = Team::find_by_id(team_id)
        .one(&txn)
        .await?
        .ok_or(Error::TeamNotFound { id: team_id })?;
    if team.event_id != Some(event_id) {
        return Err(Error::NotEnrolled { team_id, event_id });
    }

    let event = Event::find_by_id(event_id)
        .one(&txn)
        .await?
        .ok_or(Error::EventNotFound { id: event_id })?;
    let now = chrono::Utc::now();
    if !event.is_active_at(now) {
        return Err(Error::EventNotActive { name: event.name });
    }

    let inventory = Inventory::find()
        .filter(inventory::Column::EventId.eq(event_id))
        .one(&txn)
        .await?
        .ok_or(Error::NoInventory { event_id })?;

    // Validate every line before anything is written.
    let mut line_meta = Vec::with_capacity(lines.len());
    for line in lines {
        let allocation = InventoryItem::find()
            .filter(inventory_item::Column::InventoryId.eq(inventory.id))
            .filter(inventory_item::Column::FoodItemId.eq(line.food_item_id))
            .one(&txn)
            .await?
            .ok_or(Error::ItemNotAllocated {
                food_item_id: line.food_item_id,
            })?;

        let food = FoodItem::find_by_id(line.food_item_id)
            .one(&txn)
            .await?
            .ok_or(Error::FoodItemNotFound {
                id: line.food_item_id,
            })?;
        if !food.is_active {
            return Err(Error::ItemInactive { name: food.name });
        }
        if food.available_qty < line.quantity {
            return Err(Error::InsufficientStock {
                name: food.name,
                available: food.available_qty,
                requested: line.quantity,
            });
        }

        if let Some(cap) = allocation.max_order_per_team {
            let already_ordered =
                team_ordered_total(&txn, team_id, event_id, line.food_item_id).await?;
            if already_ordered + i64::from(line.quantity) > i64::from(cap) {
                return Err(Error::TeamCapExceeded {
                    name: food.name,
                    cap,
                    already_ordered,
                    requested: line.quantity,
                });
            }
        }

        line_meta.push((allocation.max_order_per_team, food.name));
    }

    let total_amount: f64 = lines
        .iter()
        .map(|line| f64::from(line.quantity) * line.price_at_order)
        .sum();

    let placed = order::ActiveModel {
        team_id: Set(team_id),
        event_id: Set(event_id),
        total_amount: Set(total_amount),
        order_status: Set(OrderStatus::Pending),
        payment_status: Set(PaymentStatus::Pending),
        placed_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for (line, (cap, food_name)) in lines.iter().zip(&line_meta) {
        order_item::ActiveModel {
            order_id: Set(placed.id),
            food_item_id: Set(line.food_item_id),
            quantity: Set(line.quantity),
            price_at_order: Set(line.price_at_order),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // Conditional decrement: zero rows affected means the remaining
        // stock no longer covers this line, regardless of what the earlier
        // validation read saw.
        let updated = FoodItem::update_many()
            .col_expr(
                food_item::Column::AvailableQty,
                Expr::col(food_item::Column::AvailableQty).sub(line.quantity),
            )
            .filter(food_item::Column::Id.eq(line.food_item_id))
            .filter(food_item::Column::AvailableQty.gte(line.quantity))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            let available = FoodItem::find_by_id(line.food_item_id)
                .one(&txn)
                .await?
                .map_or(0, |food| food.available_qty);
            return Err(Error::InsufficientStock {
                name: food_name.clone(),
                available,
                requested: line.quantity,
            });
        }

        // Re-run the cap aggregate with this line included; the transaction
        // holds the write lock by now, so the total is serialized.
        if let Some(cap) = *cap {
            let total_now = team_ordered_total(&txn, team_id, event_id, line.food_item_id).await?;
            if total_now > i64::from(cap) {
                return Err(Error::TeamCapExceeded {
                    name: food_name.clone(),
                    cap,
                    already_ordered: total_now - i64::from(line.quantity),
                    requested: line.quantity,
                });
            }
        }
    }

    txn.commit().await?;
    info!(
        order_id = placed.id,
        team_id, event_id, total_amount, "order placed"
    );

    get_order_details(db, placed.id).await
}

/// Retrieves one order with its lines and food detail.
pub async fn get_order_details(db: &DatabaseConnection, order_id: i64) -> Result<OrderDetails> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    let mut details = load_details(db, vec![order]).await?;
    details.pop().ok_or(Error::OrderNotFound { id: order_id })
}

/// Retrieves all orders, newest first.
pub async fn get_all_orders(db: &DatabaseConnection) -> Result<Vec<OrderDetails>> {
    let orders = Order::find()
        .order_by_desc(order::Column::PlacedAt)
        .all(db)
        .await?;
    load_details(db, orders).await
}

/// Retrieves a team's orders, newest first.
pub async fn get_team_orders(db: &DatabaseConnection, team_id: i64) -> Result<Vec<OrderDetails>> {
    let orders = Order::find()
        .filter(order::Column::TeamId.eq(team_id))
        .order_by_desc(order::Column::PlacedAt)
        .all(db)
        .await?;
    load_details(db, orders).await
}

/// Retrieves an event's orders, newest first.
pub async fn get_event_orders(db: &DatabaseConnection, event_id: i64) -> Result<Vec<OrderDetails>> {
    let orders = Order::find()
        .filter(order::Column::EventId.eq(event_id))
        .order_by_desc(order::Column::PlacedAt)
        .all(db)
        .await?;
    load_details(db, orders).await
}

/// Applies a status change through the transition table, optionally updating
/// the payment flag in the same write.
///
/// Terminal states reject every transition, and `CANCELLED` is not reachable
/// here because it would skip stock restoration - use [`cancel_order`].
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_id: i64,
    new_status: OrderStatus,
    payment_status: Option<PaymentStatus>,
) -> Result<OrderDetails> {
    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    if !order.order_status.can_transition_to(new_status) {
        return Err(Error::InvalidStatusTransition {
            from: order.order_status.to_value(),
            to: new_status.to_value(),
        });
    }

    let mut active: order::ActiveModel = order.into();
    active.order_status = Set(new_status);
    if let Some(payment) = payment_status {
        active.payment_status = Set(payment);
    }
    let order = active.update(db).await?;

    get_order_details(db, order.id).await
}

/// Cancels an order and restores the stock its lines consumed.
///
/// The restoration increments and the status flip form one transaction: a
/// failure partway leaves neither a half-restored stock state nor a
/// still-pending order. Completed and already-cancelled orders cannot be
/// cancelled.
pub async fn cancel_order(db: &DatabaseConnection, order_id: i64) -> Result<OrderDetails> {
    let txn = db.begin().await?;

    let order = Order::find_by_id(order_id)
        .one(&txn)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;
    if order.order_status.is_terminal() {
        return Err(Error::CannotCancel {
            order_id,
            status: order.order_status.to_value(),
        });
    }

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .all(&txn)
        .await?;

    for item in &items {
        FoodItem::update_many()
            .col_expr(
                food_item::Column::AvailableQty,
                Expr::col(food_item::Column::AvailableQty).add(item.quantity),
            )
            .filter(food_item::Column::Id.eq(item.food_item_id))
            .exec(&txn)
            .await?;
    }

    let mut active: order::ActiveModel = order.into();
    active.order_status = Set(OrderStatus::Cancelled);
    let order = active.update(&txn).await?;

    txn.commit().await?;
    info!(order_id, "order cancelled, stock restored");

    get_order_details(db, order.id).await
}

/// Loads lines and food detail for a batch of orders in two queries.
async fn load_details(
    db: &DatabaseConnection,
    orders: Vec<order::Model>,
) -> Result<Vec<OrderDetails>> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i64> = orders.iter().map(|order| order.id).collect();
    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.is_in(order_ids))
        .all(db)
        .await?;

    let food_ids: Vec<i64> = items.iter().map(|item| item.food_item_id).collect();
    let foods: HashMap<i64, food_item::Model> = FoodItem::find()
        .filter(food_item::Column::Id.is_in(food_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|food| (food.id, food))
        .collect();

    let mut by_order: HashMap<i64, Vec<OrderLineDetail>> = HashMap::new();
    for item in items {
        let food_item = foods
            .get(&item.food_item_id)
            .cloned()
            .ok_or(Error::FoodItemNotFound {
                id: item.food_item_id,
            })?;
        by_order
            .entry(item.order_id)
            .or_default()
            .push(OrderLineDetail { item, food_item });
    }

    let mut details = Vec::with_capacity(orders.len());
    for order in orders {
        let items = by_order.remove(&order.id).unwrap_or_default();
        details.push(OrderDetails { order, items });
    }
    Ok(details)
}
