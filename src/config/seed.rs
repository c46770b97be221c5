//! Seed configuration loading from config.toml
//!
//! This module provides functionality to load initial admin accounts and
//! food catalog entries from a TOML configuration file. The entries defined
//! in config.toml are applied idempotently on startup: rows whose username
//! (admins) or name (food items) already exists are skipped.

use crate::{
    core::food,
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Admin accounts to seed
    #[serde(default)]
    pub admins: Vec<AdminSeed>,
    /// Food catalog entries to seed
    #[serde(default)]
    pub food_items: Vec<FoodItemSeed>,
}

/// Configuration for a single admin account
#[derive(Debug, Deserialize, Clone)]
pub struct AdminSeed {
    /// Display name
    pub name: String,
    /// Unique login name
    pub username: String,
    /// Optional contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Opaque password hash issued by the auth tier
    pub password_hash: String,
}

/// Configuration for a single food catalog entry
#[derive(Debug, Deserialize, Clone)]
pub struct FoodItemSeed {
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price; zero means free
    pub price: f64,
    /// Initial stock level
    #[serde(default)]
    pub available_qty: i32,
    /// Optional image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Dietary restriction tags
    #[serde(default)]
    pub restrictions: Vec<String>,
}

/// Counters for what [`apply_seed`] actually inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Admin accounts inserted this run
    pub admins_created: usize,
    /// Food items inserted this run
    pub food_items_created: usize,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<SeedConfig> {
    load_config("config.toml")
}

/// Applies the seed configuration, skipping rows that already exist.
pub async fn apply_seed(db: &DatabaseConnection, config: &SeedConfig) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for admin in &config.admins {
        let existing = User::find()
            .filter(user::Column::Username.eq(&admin.username))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        user::ActiveModel {
            name: Set(admin.name.clone()),
            username: Set(admin.username.clone()),
            email: Set(admin.email.clone()),
            password_hash: Set(admin.password_hash.clone()),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        report.admins_created += 1;
    }

    for item in &config.food_items {
        let existing = crate::entities::FoodItem::find()
            .filter(crate::entities::FoodItemColumn::Name.eq(&item.name))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        food::create_food_item(
            db,
            item.name.clone(),
            item.description.clone(),
            item.price,
            item.image_url.clone(),
            item.available_qty,
            item.restrictions.clone(),
        )
        .await?;
        report.food_items_created += 1;
    }

    info!(
        admins = report.admins_created,
        food_items = report.food_items_created,
        "seed applied"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const SAMPLE: &str = r#"
        [[admins]]
        name = "Ops Admin"
        username = "ops"
        email = "ops@example.com"
        password_hash = "$2a$12$abcdefghijklmnopqrstuv"

        [[food_items]]
        name = "Margherita Pizza"
        description = "Classic tomato and mozzarella"
        price = 12.5
        available_qty = 40
        restrictions = ["vegetarian"]

        [[food_items]]
        name = "Water"
        price = 0.0
    "#;

    #[test]
    fn test_parse_seed_config() {
        let config: SeedConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.admins.len(), 1);
        assert_eq!(config.admins[0].username, "ops");
        assert_eq!(config.food_items.len(), 2);
        assert_eq!(config.food_items[0].price, 12.5);
        assert_eq!(config.food_items[0].restrictions, vec!["vegetarian"]);
        // Defaults fill in omitted fields
        assert_eq!(config.food_items[1].available_qty, 0);
        assert!(config.food_items[1].restrictions.is_empty());
    }

    #[tokio::test]
    async fn test_apply_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config: SeedConfig = toml::from_str(SAMPLE).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;

        let first = apply_seed(&db, &config).await?;
        assert_eq!(first.admins_created, 1);
        assert_eq!(first.food_items_created, 2);

        // Second run inserts nothing new
        let second = apply_seed(&db, &config).await?;
        assert_eq!(second.admins_created, 0);
        assert_eq!(second.food_items_created, 0);

        assert_eq!(User::find().all(&db).await?.len(), 1);
        assert_eq!(crate::entities::FoodItem::find().all(&db).await?.len(), 2);

        Ok(())
    }
}
