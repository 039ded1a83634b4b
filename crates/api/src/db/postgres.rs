//! `PostgreSQL` implementation of [`EntityStore`].
//!
//! Queries are checked at runtime (`query_as` + `FromRow`), so the crate
//! builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use ecommerce_core::{Email, OrderId, Price, ProductId, Quantity, Stock, UserId};

use super::{EntityStore, RepositoryError, UniqueField};
use crate::models::{
    Audit, HashedPassword, NewOrder, NewProduct, NewUser, Order, Product, User,
};

/// Unique index on `users.email` for live rows.
const USERS_EMAIL_KEY: &str = "users_email_active_key";
/// Unique index on `users.username` for live rows.
const USERS_USERNAME_KEY: &str = "users_username_active_key";
/// Unique index on `products.name` for live rows.
const PRODUCTS_NAME_KEY: &str = "products_name_active_key";

/// Entity store backed by a `PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool. The schema is assumed to be migrated.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    username: String,
    email: Email,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            audit: Audit {
                id: row.id,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
            username: row.username,
            email: row.email,
            password: HashedPassword::from_phc(row.password),
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: Option<String>,
    price: Price,
    stock: Stock,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            audit: Audit {
                id: row.id,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
            name: row.name,
            description: row.description,
            price: row.price,
            stock: row.stock,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    product_id: ProductId,
    quantity: Quantity,
    total_price: Price,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            audit: Audit {
                id: row.id,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            },
            user_id: row.user_id,
            product_id: row.product_id,
            quantity: row.quantity,
            total_price: row.total_price,
        }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, email, password, first_name, last_name,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        Ok(row.map(User::from))
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, email, password, first_name, last_name,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE username = $1 AND deleted_at IS NULL
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        Ok(row.map(User::from))
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, stock,
                   created_at, updated_at, deleted_at
            FROM products
            WHERE name = $1 AND deleted_at IS NULL
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        Ok(row.map(Product::from))
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, username, email, password, first_name, last_name,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        Ok(row.map(User::from))
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, stock,
                   created_at, updated_at, deleted_at
            FROM products
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        Ok(row.map(Product::from))
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, product_id, quantity, total_price,
                   created_at, updated_at, deleted_at
            FROM orders
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_read_error)?;

        Ok(row.map(Order::from))
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (username, email, password, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password, first_name, last_name,
                      created_at, updated_at, deleted_at
            ",
        )
        .bind(user.username.as_str())
        .bind(&user.email)
        .bind(user.password.as_str())
        .bind(user.first_name.as_deref())
        .bind(user.last_name.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, description, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, stock,
                      created_at, updated_at, deleted_at
            ",
        )
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, product_id, quantity, total_price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, product_id, quantity, total_price,
                      created_at, updated_at, deleted_at
            ",
        )
        .bind(order.user_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.total_price)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map the name of a violated unique index to the field it guards.
fn unique_field_for(constraint: &str) -> Option<UniqueField> {
    match constraint {
        USERS_EMAIL_KEY => Some(UniqueField::Email),
        USERS_USERNAME_KEY => Some(UniqueField::Username),
        PRODUCTS_NAME_KEY => Some(UniqueField::ProductName),
        _ => None,
    }
}

/// Rows that fail to decode into domain values are reported as corruption.
fn map_read_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::ColumnDecode { index, source } => {
            RepositoryError::DataCorruption(format!("column {index}: {source}"))
        }
        other => RepositoryError::Database(other),
    }
}

/// Translate constraint violations raised by an insert.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation()
            && let Some(field) = db_err.constraint().and_then(unique_field_for)
        {
            return RepositoryError::Conflict(field);
        }
        if db_err.is_foreign_key_violation() {
            let constraint = db_err.constraint().unwrap_or("foreign key");
            return RepositoryError::MissingReference(constraint.to_owned());
        }
    }
    map_read_error(e)
}
