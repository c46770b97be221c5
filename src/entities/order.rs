//! Order entity - A team's committed food order within an event.
//!
//! Orders are created only by the order transaction engine
//! ([`crate::core::order::place_order`]) with status `PENDING` and payment
//! status `pending`. Status changes go through the engine's transition table;
//! cancellation restores stock and is the only path to `CANCELLED`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OrderStatus {
    /// Placed, awaiting admin confirmation
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Confirmed by an admin
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    /// Fulfilled; terminal
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Cancelled with stock restored; terminal
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl OrderStatus {
    /// Terminal states reject every further transition.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether `next` is a legal transition via the status-update procedure.
    ///
    /// Allowed edges: `PENDING -> CONFIRMED`, `PENDING -> COMPLETED`,
    /// `CONFIRMED -> COMPLETED`. Re-asserting the current status is a no-op
    /// (so payment status can be toggled alone). `CANCELLED` is never
    /// reachable here - it would skip stock restoration, which only
    /// [`crate::core::order::cancel_order`] performs.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() || next == Self::Cancelled {
            return false;
        }
        match (self, next) {
            (current, requested) if current == requested => true,
            (Self::Pending, Self::Confirmed | Self::Completed)
            | (Self::Confirmed, Self::Completed) => true,
            _ => false,
        }
    }
}

/// Payment state of an order; toggled manually by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentStatus {
    /// Not yet marked paid
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Marked paid by an admin
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Sequential order number
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Team that placed the order
    pub team_id: i64,
    /// Event the order was placed within
    pub event_id: i64,
    /// Sum of quantity x price-at-order across all lines
    pub total_amount: f64,
    /// Lifecycle status
    pub order_status: OrderStatus,
    /// Payment flag
    pub payment_status: PaymentStatus,
    /// When the order was committed
    pub placed_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one team
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,
    /// Each order belongs to one event
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id"
    )]
    Event,
    /// One order owns many line items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
