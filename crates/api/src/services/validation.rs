//! Uniqueness pre-checks.
//!
//! These run before an insert so that the common duplicate case gets a
//! friendly message without touching the write path. They are not a
//! guarantee: two concurrent requests can both pass, and the store's unique
//! indexes then reject the second insert with the same [`UniqueField`].

use thiserror::Error;

use crate::db::{EntityStore, RepositoryError, UniqueField};
use crate::models::{NewProduct, UserRegistration};

/// Why a create request may not proceed.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A live row already holds this value.
    #[error("{0}")]
    Duplicate(UniqueField),

    /// The lookup itself failed.
    #[error("lookup failed: {0}")]
    Lookup(#[from] RepositoryError),
}

/// Check that neither the email nor the username of `registration` is in
/// use. Email is checked first.
///
/// # Errors
///
/// Returns `ValidationError::Duplicate` naming the first taken field, or
/// `ValidationError::Lookup` if the store fails.
pub async fn ensure_user_available(
    store: &dyn EntityStore,
    registration: &UserRegistration,
) -> Result<(), ValidationError> {
    if store
        .find_user_by_email(&registration.email)
        .await?
        .is_some()
    {
        return Err(ValidationError::Duplicate(UniqueField::Email));
    }

    if store
        .find_user_by_username(registration.username.as_str())
        .await?
        .is_some()
    {
        return Err(ValidationError::Duplicate(UniqueField::Username));
    }

    Ok(())
}

/// Check that no live product has the name of `product`.
///
/// # Errors
///
/// Returns `ValidationError::Duplicate` if the name is taken, or
/// `ValidationError::Lookup` if the store fails.
pub async fn ensure_product_available(
    store: &dyn EntityStore,
    product: &NewProduct,
) -> Result<(), ValidationError> {
    match store.find_product_by_name(product.name.as_str()).await? {
        Some(_) => Err(ValidationError::Duplicate(UniqueField::ProductName)),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ecommerce_core::{Email, Price, Stock};

    use super::*;
    use crate::db::memory::{Fault, MemoryStore};
    use crate::models::{HashedPassword, NewUser, RequiredText};

    fn registration(username: &str, email: &str) -> UserRegistration {
        serde_json::from_value(serde_json::json!({
            "username": username,
            "email": email,
            "password": "secret123",
        }))
        .unwrap()
    }

    fn widget() -> NewProduct {
        NewProduct {
            name: RequiredText::parse("Widget").unwrap(),
            description: None,
            price: Price::ZERO,
            stock: Stock::new(0).unwrap(),
        }
    }

    async fn seed_ada(store: &MemoryStore) {
        store
            .insert_user(&NewUser {
                username: RequiredText::parse("ada").unwrap(),
                email: Email::parse("ada@example.com").unwrap(),
                password: HashedPassword::from_phc("$argon2id$v=19$stub".to_owned()),
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_user_available_on_empty_store() {
        let store = MemoryStore::new();
        let result = ensure_user_available(&store, &registration("ada", "ada@example.com")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_email_checked_before_username() {
        let store = MemoryStore::new();
        seed_ada(&store).await;

        let err = ensure_user_available(&store, &registration("ada", "ada@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate(UniqueField::Email)));

        let err = ensure_user_available(&store, &registration("ada", "lovelace@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate(UniqueField::Username)));
    }

    #[tokio::test]
    async fn test_product_name_taken() {
        let store = MemoryStore::new();
        assert!(ensure_product_available(&store, &widget()).await.is_ok());

        store.insert_product(&widget()).await.unwrap();
        let err = ensure_product_available(&store, &widget()).await.unwrap_err();
        assert!(matches!(err, ValidationError::Duplicate(UniqueField::ProductName)));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_a_duplicate() {
        let store = MemoryStore::with_fault(Fault::Lookups);
        let err = ensure_product_available(&store, &widget()).await.unwrap_err();
        assert!(matches!(err, ValidationError::Lookup(_)));
    }
}
