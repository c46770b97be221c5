//! Order procedures - placement, queries, status changes, cancellation.

use crate::{
    auth::{self, Role, Session},
    core::order::{self, OrderDetails, OrderLineInput},
    entities::order::{OrderStatus, PaymentStatus},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

/// Input for [`create_order`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateOrderInput {
    /// Team placing the order; must match the session
    pub team_id: i64,
    /// Event the order targets
    pub event_id: i64,
    /// Requested lines
    pub items: Vec<OrderLineInput>,
}

/// Input for [`update_order_status`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateOrderStatusInput {
    /// Order to update
    pub order_id: i64,
    /// Requested status
    pub order_status: OrderStatus,
    /// Optional payment flag change applied in the same write
    pub payment_status: Option<PaymentStatus>,
}

/// Places an order for the calling team (protected, team tier).
///
/// The team id is pinned to the session, so a client cannot order on behalf
/// of another team; the engine's enrollment check then catches sessions gone
/// stale after an admin reassignment.
pub async fn create_order(
    db: &DatabaseConnection,
    session: &Session,
    input: CreateOrderInput,
) -> Result<OrderDetails> {
    auth::require_team_self(session, input.team_id)?;
    order::place_order(db, input.team_id, input.event_id, &input.items).await
}

/// Lists every order (public).
pub async fn get_all_orders(db: &DatabaseConnection) -> Result<Vec<OrderDetails>> {
    order::get_all_orders(db).await
}

/// Lists a team's orders, newest first (public).
pub async fn get_team_orders(db: &DatabaseConnection, team_id: i64) -> Result<Vec<OrderDetails>> {
    order::get_team_orders(db, team_id).await
}

/// Lists an event's orders, newest first (public).
pub async fn get_event_orders(db: &DatabaseConnection, event_id: i64) -> Result<Vec<OrderDetails>> {
    order::get_event_orders(db, event_id).await
}

/// Moves an order through the status transition table (protected, admin).
pub async fn update_order_status(
    db: &DatabaseConnection,
    session: &Session,
    input: UpdateOrderStatusInput,
) -> Result<OrderDetails> {
    auth::require_admin(session)?;
    order::update_order_status(db, input.order_id, input.order_status, input.payment_status).await
}

/// Cancels an order and restores its stock (protected).
///
/// Admins may cancel any order; a team may cancel only its own.
pub async fn cancel_order(
    db: &DatabaseConnection,
    session: &Session,
    order_id: i64,
) -> Result<OrderDetails> {
    if session.role == Role::Team {
        let details = order::get_order_details(db, order_id).await?;
        if details.order.team_id != session.subject_id {
            return Err(Error::PermissionDenied {
                message: "teams may only cancel their own orders".to_string(),
            });
        }
    }
    order::cancel_order(db, order_id).await
}
