//! Unified error types for the crate.
//!
//! Every named failure from the ordering, allocation, and team surfaces is a
//! distinct variant carrying the detail the caller needs to render a precise
//! message (available vs requested stock, cap vs already-ordered amounts).
//! Validation failures are detected before any mutation; store-level failures
//! during a commit roll the surrounding transaction back and surface as
//! [`Error::Database`].

use thiserror::Error;

/// Unified error type for all operations in the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or input-shape problem described by a message
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Underlying store failure; the surrounding transaction has rolled back
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (config file reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller lacks the role a protected procedure requires
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// What was required of the caller
        message: String,
    },

    /// No event exists with the given id
    #[error("Event {id} not found")]
    EventNotFound {
        /// Requested event id
        id: i64,
    },

    /// No team exists with the given id
    #[error("Team {id} not found")]
    TeamNotFound {
        /// Requested team id
        id: i64,
    },

    /// No food item exists with the given id
    #[error("Food item {id} not found")]
    FoodItemNotFound {
        /// Requested food item id
        id: i64,
    },

    /// No order exists with the given id
    #[error("Order {id} not found")]
    OrderNotFound {
        /// Requested order id
        id: i64,
    },

    /// No inventory allocation exists with the given id
    #[error("Inventory item {id} not found")]
    InventoryItemNotFound {
        /// Requested inventory item id
        id: i64,
    },

    /// No team credential exists with the given id
    #[error("Team credential {id} not found")]
    CredentialNotFound {
        /// Requested credential id
        id: i64,
    },

    /// No quick link exists with the given id
    #[error("Quick link {id} not found")]
    QuickLinkNotFound {
        /// Requested quick link id
        id: i64,
    },

    /// The team's current event assignment does not match the order's event
    #[error("Team {team_id} is not enrolled in event {event_id}")]
    NotEnrolled {
        /// Team attempting the order
        team_id: i64,
        /// Event the order was placed against
        event_id: i64,
    },

    /// The current time is outside the event's start/end window
    #[error("Event '{name}' is not currently active for ordering")]
    EventNotActive {
        /// Name of the inactive event
        name: String,
    },

    /// The event has no inventory record, so nothing can be ordered from it
    #[error("No inventory found for event {event_id}")]
    NoInventory {
        /// Event without an inventory
        event_id: i64,
    },

    /// The food item is not allocated to the event's inventory
    #[error("Food item {food_item_id} is not available for this event")]
    ItemNotAllocated {
        /// Unallocated food item id
        food_item_id: i64,
    },

    /// The food item has been deactivated by an admin
    #[error("Food item '{name}' is no longer available")]
    ItemInactive {
        /// Name of the inactive food item
        name: String,
    },

    /// Requested quantity exceeds the food item's available stock
    #[error("Not enough '{name}' available: {available} in stock, {requested} requested")]
    InsufficientStock {
        /// Name of the food item
        name: String,
        /// Stock available at validation time
        available: i32,
        /// Quantity the caller requested
        requested: i32,
    },

    /// Cumulative team quantity would exceed the allocation's per-team cap
    #[error(
        "Team order limit exceeded for '{name}': limit {cap}, already ordered {already_ordered}, requested {requested}"
    )]
    TeamCapExceeded {
        /// Name of the food item
        name: String,
        /// Per-team cap defined on the allocation
        cap: i32,
        /// Quantity the team has already ordered (non-cancelled orders)
        already_ordered: i64,
        /// Quantity the caller requested
        requested: i32,
    },

    /// The (event, food item) pair already has an allocation
    #[error("Food item {food_item_id} is already allocated to event {event_id}")]
    AlreadyAllocated {
        /// Target event
        event_id: i64,
        /// Already-allocated food item
        food_item_id: i64,
    },

    /// One or more usernames are already taken
    #[error("Username(s) already exist: {usernames}")]
    DuplicateUsername {
        /// Comma-separated list of the offending usernames
        usernames: String,
    },

    /// The order is in a state that cannot be cancelled
    #[error("Cannot cancel order {order_id} in status {status}")]
    CannotCancel {
        /// Order the caller tried to cancel
        order_id: i64,
        /// Its current status
        status: String,
    },

    /// The requested status change is not a legal transition
    #[error("Invalid order status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status
        from: String,
        /// Requested status
        to: String,
    },

    /// Event end date is not after its start date
    #[error("Invalid date range: end date must be after start date")]
    InvalidDateRange,

    /// Quantity is outside its valid range
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i32,
    },

    /// Amount is negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// An order must contain at least one line
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// The event still has orders and cannot be deleted
    #[error("Event {event_id} has existing orders and cannot be deleted")]
    EventHasOrders {
        /// Event the caller tried to delete
        event_id: i64,
    },

    /// The food item is referenced by order history and cannot be deleted
    #[error("Food item {food_item_id} is referenced by existing orders and cannot be deleted")]
    FoodItemInUse {
        /// Food item the caller tried to delete
        food_item_id: i64,
    },

    /// The food item is still allocated to at least one event inventory
    #[error("Food item {food_item_id} is still allocated to an event and cannot be deleted")]
    FoodItemAllocated {
        /// Food item the caller tried to delete
        food_item_id: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
