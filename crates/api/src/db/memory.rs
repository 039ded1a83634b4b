//! In-process [`EntityStore`] for tests.
//!
//! Enforces the same rules as the `PostgreSQL` schema: unique email,
//! username and product name among live rows, and existing user/product
//! references for orders. A [`Fault`] can be injected to drive the error
//! paths of callers.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use ecommerce_core::{Email, OrderId, ProductId, UserId};

use super::{EntityStore, RepositoryError, UniqueField};
use crate::models::{Audit, NewOrder, NewProduct, NewUser, Order, Product, User};

/// Failure to inject into a [`MemoryStore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fault {
    /// Behave normally.
    #[default]
    None,
    /// Every lookup fails with a database error.
    Lookups,
    /// Every insert fails with a database error.
    Inserts,
    /// Lookups report nothing, as if a concurrent insert has not landed yet.
    /// Inserts still enforce uniqueness.
    StaleLookups,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl Tables {
    fn live_users(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| !u.audit.is_deleted())
    }

    fn live_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.audit.is_deleted())
    }

    fn live_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().filter(|o| !o.audit.is_deleted())
    }
}

/// Entity store holding rows in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fault: Fault,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that misbehaves as described by `fault`.
    #[must_use]
    pub fn with_fault(fault: Fault) -> Self {
        Self {
            tables: Mutex::default(),
            fault,
        }
    }

    /// Snapshot of every user row, including soft-deleted ones.
    pub async fn users(&self) -> Vec<User> {
        self.tables.lock().await.users.clone()
    }

    /// Snapshot of every product row, including soft-deleted ones.
    pub async fn products(&self) -> Vec<Product> {
        self.tables.lock().await.products.clone()
    }

    /// Set `deleted_at` on a user row. Returns `false` if there is no such row.
    pub async fn soft_delete_user(&self, id: UserId) -> bool {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        tables
            .users
            .iter_mut()
            .find(|u| u.audit.id == id)
            .map(|u| u.audit.deleted_at = Some(now))
            .is_some()
    }

    /// Set `deleted_at` on a product row. Returns `false` if there is no such row.
    pub async fn soft_delete_product(&self, id: ProductId) -> bool {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        tables
            .products
            .iter_mut()
            .find(|p| p.audit.id == id)
            .map(|p| p.audit.deleted_at = Some(now))
            .is_some()
    }

    fn check_lookup(&self) -> Result<bool, RepositoryError> {
        match self.fault {
            Fault::Lookups => Err(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
            Fault::StaleLookups => Ok(false),
            Fault::None | Fault::Inserts => Ok(true),
        }
    }

    fn check_insert(&self) -> Result<(), RepositoryError> {
        if self.fault == Fault::Inserts {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

/// Next `SERIAL` value for a table holding `len` rows.
fn next_id(len: usize) -> Result<i32, RepositoryError> {
    i32::try_from(len + 1)
        .map_err(|_| RepositoryError::DataCorruption("id sequence exhausted".to_owned()))
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        if !self.check_lookup()? {
            return Ok(None);
        }
        let tables = self.tables.lock().await;
        Ok(tables.live_users().find(|u| &u.email == email).cloned())
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        if !self.check_lookup()? {
            return Ok(None);
        }
        let tables = self.tables.lock().await;
        Ok(tables.live_users().find(|u| u.username == username).cloned())
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<Product>, RepositoryError> {
        if !self.check_lookup()? {
            return Ok(None);
        }
        let tables = self.tables.lock().await;
        Ok(tables.live_products().find(|p| p.name == name).cloned())
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        if !self.check_lookup()? {
            return Ok(None);
        }
        let tables = self.tables.lock().await;
        Ok(tables.live_users().find(|u| u.audit.id == id).cloned())
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        if !self.check_lookup()? {
            return Ok(None);
        }
        let tables = self.tables.lock().await;
        Ok(tables.live_products().find(|p| p.audit.id == id).cloned())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        if !self.check_lookup()? {
            return Ok(None);
        }
        let tables = self.tables.lock().await;
        Ok(tables.live_orders().find(|o| o.audit.id == id).cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        self.check_insert()?;
        let mut tables = self.tables.lock().await;

        if tables.live_users().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(UniqueField::Email));
        }
        if tables
            .live_users()
            .any(|u| u.username == user.username.as_str())
        {
            return Err(RepositoryError::Conflict(UniqueField::Username));
        }

        let id = UserId::new(next_id(tables.users.len())?);
        let created = User {
            audit: Audit::created(id, Utc::now()),
            username: user.username.as_str().to_owned(),
            email: user.email.clone(),
            password: user.password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        self.check_insert()?;
        let mut tables = self.tables.lock().await;

        if tables
            .live_products()
            .any(|p| p.name == product.name.as_str())
        {
            return Err(RepositoryError::Conflict(UniqueField::ProductName));
        }

        let id = ProductId::new(next_id(tables.products.len())?);
        let created = Product {
            audit: Audit::created(id, Utc::now()),
            name: product.name.as_str().to_owned(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
        };
        tables.products.push(created.clone());
        Ok(created)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
        self.check_insert()?;
        let mut tables = self.tables.lock().await;

        // Foreign keys reference the row, deleted or not.
        if !tables.users.iter().any(|u| u.audit.id == order.user_id) {
            return Err(RepositoryError::MissingReference(
                "orders_user_id_fkey".to_owned(),
            ));
        }
        if !tables.products.iter().any(|p| p.audit.id == order.product_id) {
            return Err(RepositoryError::MissingReference(
                "orders_product_id_fkey".to_owned(),
            ));
        }

        let id = OrderId::new(next_id(tables.orders.len())?);
        let created = Order {
            audit: Audit::created(id, Utc::now()),
            user_id: order.user_id,
            product_id: order.product_id,
            quantity: order.quantity,
            total_price: order.total_price,
        };
        tables.orders.push(created.clone());
        Ok(created)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        if self.fault == Fault::Lookups {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ecommerce_core::{Price, Quantity, Stock};

    use super::*;
    use crate::models::{HashedPassword, RequiredText};

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: RequiredText::parse(username).unwrap(),
            email: Email::parse(email).unwrap(),
            password: HashedPassword::from_phc("$argon2id$v=19$stub".to_owned()),
            first_name: None,
            last_name: None,
        }
    }

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: RequiredText::parse(name).unwrap(),
            description: None,
            price: Price::ZERO,
            stock: Stock::new(1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_user_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let ada = store.insert_user(&new_user("ada", "ada@example.com")).await.unwrap();
        let bob = store.insert_user(&new_user("bob", "bob@example.com")).await.unwrap();

        assert_eq!(ada.id(), UserId::new(1));
        assert_eq!(bob.id(), UserId::new(2));
        assert_eq!(ada.audit.created_at, ada.audit.updated_at);
    }

    #[tokio::test]
    async fn test_insert_user_enforces_unique_fields() {
        let store = MemoryStore::new();
        store.insert_user(&new_user("ada", "ada@example.com")).await.unwrap();

        let err = store
            .insert_user(&new_user("other", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(UniqueField::Email)));

        let err = store
            .insert_user(&new_user("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(UniqueField::Username)));
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_soft_deleted_rows_are_invisible_and_free_their_keys() {
        let store = MemoryStore::new();
        let ada = store.insert_user(&new_user("ada", "ada@example.com")).await.unwrap();
        assert!(store.soft_delete_user(ada.id()).await);

        let email = Email::parse("ada@example.com").unwrap();
        assert!(store.find_user_by_email(&email).await.unwrap().is_none());
        assert!(store.find_user(ada.id()).await.unwrap().is_none());
        assert!(store.insert_user(&new_user("ada", "ada@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn test_soft_deleted_product_is_invisible() {
        let store = MemoryStore::new();
        let widget = store.insert_product(&new_product("Widget")).await.unwrap();
        assert_eq!(store.find_product(widget.id()).await.unwrap(), Some(widget.clone()));

        assert!(store.soft_delete_product(widget.id()).await);
        assert!(store.find_product(widget.id()).await.unwrap().is_none());
        assert!(store.find_product_by_name("Widget").await.unwrap().is_none());
        assert_eq!(store.products().await.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_order_requires_existing_references() {
        let store = MemoryStore::new();
        let user = store.insert_user(&new_user("ada", "ada@example.com")).await.unwrap();
        let product = store.insert_product(&new_product("Widget")).await.unwrap();

        let quantity = Quantity::new(2).unwrap();
        let order = NewOrder::for_product(user.id(), &product, quantity).unwrap();
        let stored = store.insert_order(&order).await.unwrap();
        assert_eq!(store.find_order(stored.id()).await.unwrap(), Some(stored));

        let dangling = NewOrder {
            user_id: UserId::new(99),
            ..order.clone()
        };
        let err = store.insert_order(&dangling).await.unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference(ref c) if c == "orders_user_id_fkey"));

        let dangling = NewOrder {
            product_id: ProductId::new(99),
            ..order
        };
        let err = store.insert_order(&dangling).await.unwrap_err();
        assert!(matches!(err, RepositoryError::MissingReference(ref c) if c == "orders_product_id_fkey"));
    }

    #[tokio::test]
    async fn test_faults() {
        let store = MemoryStore::with_fault(Fault::Lookups);
        assert!(store.find_product_by_name("Widget").await.is_err());
        assert!(store.ping().await.is_err());

        let store = MemoryStore::with_fault(Fault::Inserts);
        assert!(store.insert_product(&new_product("Widget")).await.is_err());

        let store = MemoryStore::with_fault(Fault::StaleLookups);
        store.insert_product(&new_product("Widget")).await.unwrap();
        assert!(store.find_product_by_name("Widget").await.unwrap().is_none());
        let err = store.insert_product(&new_product("Widget")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(UniqueField::ProductName)));
    }
}
