//! Entity store: the persistence gateway for users, products and orders.
//!
//! # Tables
//!
//! - `users` - accounts; `email` and `username` unique among live rows
//! - `products` - catalog; `name` unique among live rows
//! - `orders` - one user, one product, a quantity and a total
//!
//! Every table carries `created_at`, `updated_at` and a nullable
//! `deleted_at`. Lookups skip soft-deleted rows.
//!
//! # Migrations
//!
//! The initial schema lives in `crates/api/migrations/` and is embedded into
//! the binary. [`open_store`] applies it on startup; it can also be run on its
//! own with:
//! ```bash
//! cargo run -p ecommerce-cli -- migrate
//! ```

#[cfg(test)]
pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use thiserror::Error;

use ecommerce_core::{Email, OrderId, ProductId, UserId};

use crate::config::{ConfigError, DatabaseConfig};
use crate::models::{NewOrder, NewProduct, NewUser, Order, Product, User};

pub use postgres::PgStore;

/// A field that must be unique among live rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
    /// `users.email`
    Email,
    /// `users.username`
    Username,
    /// `products.name`
    ProductName,
}

impl UniqueField {
    /// The client-facing message for a duplicate value.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Email => "Email already in use",
            Self::Username => "Username already in use",
            Self::ProductName => "Product name already in use",
        }
    }
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A unique index rejected the row.
    #[error("constraint violation: {0}")]
    Conflict(UniqueField),

    /// A foreign key pointed at a row that does not exist.
    #[error("missing referenced row: {0}")]
    MissingReference(String),
}

/// Lookup-by-unique-field and insert-with-constraints over the three
/// entities.
///
/// Each method is a single round trip. Inserts return the stored entity with
/// its generated ID and timestamps. Unique violations surface as
/// [`RepositoryError::Conflict`] so that a duplicate caught by the database
/// looks the same to callers as one caught by a prior lookup.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Find a live user by email.
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Find a live user by username.
    async fn find_user_by_username(&self, username: &str)
    -> Result<Option<User>, RepositoryError>;

    /// Find a live product by name.
    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError>;

    /// Find a live user by ID.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Find a live product by ID.
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Find a live order by ID.
    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError>;

    /// Insert a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email or username is taken.
    async fn insert_user(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Insert a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is taken.
    async fn insert_product(&self, product: &NewProduct) -> Result<Product, RepositoryError>;

    /// Insert an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if the user or product
    /// does not exist.
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Errors that can occur while opening the store at startup.
#[derive(Debug, Error)]
pub enum StoreInitError {
    #[error("invalid database configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("failed to migrate database: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply the embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Connect, migrate, and wrap the pool in a [`PgStore`].
///
/// This is the only way the server obtains its store.
///
/// # Errors
///
/// Returns `StoreInitError` if the configuration is invalid, the database is
/// unreachable, or the migration fails.
pub async fn open_store(config: &DatabaseConfig) -> Result<PgStore, StoreInitError> {
    let pool = create_pool(config.connect_options()?).await?;
    tracing::info!("Database pool created");

    run_migrations(&pool).await?;
    tracing::info!("Database schema is up to date");

    Ok(PgStore::new(pool))
}
