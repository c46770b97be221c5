//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod event;
pub mod food_item;
pub mod inventory;
pub mod inventory_item;
pub mod order;
pub mod order_item;
pub mod quick_link;
pub mod team;
pub mod team_credential;
pub mod user;

// Re-export specific types to avoid conflicts
pub use event::{Column as EventColumn, Entity as Event, Model as EventModel};
pub use food_item::{Column as FoodItemColumn, Entity as FoodItem, Model as FoodItemModel};
pub use inventory::{Column as InventoryColumn, Entity as Inventory, Model as InventoryModel};
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, Model as InventoryItemModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel};
pub use order_item::{Column as OrderItemColumn, Entity as OrderItem, Model as OrderItemModel};
pub use quick_link::{Column as QuickLinkColumn, Entity as QuickLink, Model as QuickLinkModel};
pub use team::{Column as TeamColumn, Entity as Team, Model as TeamModel};
pub use team_credential::{
    Column as TeamCredentialColumn, Entity as TeamCredential, Model as TeamCredentialModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
