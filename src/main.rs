//! Bootstrap binary: prepares the database the web tier serves from.
//!
//! Initializes tracing, loads `.env`, connects to the database, creates the
//! tables from the entity definitions, and applies the optional seed
//! configuration (admin accounts, initial food catalog) idempotently.

use dotenvy::dotenv;
use feast_buddy::{config, errors::Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Make it non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Initialize database
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Apply seed data if a config.toml is present
    match config::seed::load_default_config() {
        Ok(seed_config) => {
            let report = config::seed::apply_seed(&db, &seed_config).await?;
            info!(
                admins = report.admins_created,
                food_items = report.food_items_created,
                "Seed data applied."
            );
        }
        Err(e) => warn!("No seed configuration applied: {e}"),
    }

    Ok(())
}
