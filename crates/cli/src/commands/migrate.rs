//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! ecommerce migrate
//! ```
//!
//! Applies the migrations embedded in `ecommerce-api` (its `migrations/`
//! directory). Already-applied migrations are skipped, so running it twice is
//! harmless. The API server applies the same set on startup.

use ecommerce_api::config::{ConfigError, DatabaseConfig};
use ecommerce_api::db;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the schema migrations.
pub async fn run() -> Result<(), MigrationError> {
    let config = DatabaseConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(config.connect_options()?).await?;

    tracing::info!("Running migrations...");
    db::run_migrations(&pool).await?;

    pool.close().await;
    tracing::info!("Migrations complete!");
    Ok(())
}
