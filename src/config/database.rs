//! Database configuration module for `FeastBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using
//! `SeaORM`. It provides functions for establishing database connections and
//! creating all necessary tables based on the entity definitions. The module
//! uses `SeaORM`'s `Schema::create_table_from_entity` method to automatically
//! generate SQL statements from the entity models, ensuring that the database
//! schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    Event, FoodItem, Inventory, InventoryItem, Order, OrderItem, QuickLink, Team, TeamCredential,
    User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default
/// `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back
/// to a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/feast_buddy.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the `SQLite` database using the
/// `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set. This function handles connection errors and provides a clean
/// interface for database access throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically
/// generate proper SQL statements for table creation, ensuring the database
/// schema matches the Rust struct definitions. Tables are created in
/// dependency order and skipped when they already exist, so repeated startup
/// against the same database file is safe.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    // Use SeaORM's proper table creation using Schema::create_table_from_entity
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Event),
        schema.create_table_from_entity(Team),
        schema.create_table_from_entity(FoodItem),
        schema.create_table_from_entity(Inventory),
        schema.create_table_from_entity(InventoryItem),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(TeamCredential),
        schema.create_table_from_entity(QuickLink),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        event::Model as EventModel, food_item::Model as FoodItemModel,
        inventory::Model as InventoryModel, inventory_item::Model as InventoryItemModel,
        order::Model as OrderModel, order_item::Model as OrderItemModel,
        quick_link::Model as QuickLinkModel, team::Model as TeamModel,
        team_credential::Model as TeamCredentialModel, user::Model as UserModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // Use in-memory database for testing to avoid schema conflicts with
        // existing database
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<EventModel> = Event::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<EventModel> = Event::find().limit(1).all(&db).await?;
        let _: Vec<TeamModel> = Team::find().limit(1).all(&db).await?;
        let _: Vec<FoodItemModel> = FoodItem::find().limit(1).all(&db).await?;
        let _: Vec<InventoryModel> = Inventory::find().limit(1).all(&db).await?;
        let _: Vec<InventoryItemModel> = InventoryItem::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<OrderItemModel> = OrderItem::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<TeamCredentialModel> = TeamCredential::find().limit(1).all(&db).await?;
        let _: Vec<QuickLinkModel> = QuickLink::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<EventModel> = Event::find().limit(1).all(&db).await?;
        Ok(())
    }
}
