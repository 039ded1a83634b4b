//! User creation.

use secrecy::ExposeSecret;
use thiserror::Error;

use super::password::{HashError, hash_password};
use super::validation::{ValidationError, ensure_user_available};
use crate::db::{EntityStore, RepositoryError, UniqueField};
use crate::models::{NewUser, User, UserRegistration};

/// Errors from [`UserService::create`].
#[derive(Debug, Error)]
pub enum CreateUserError {
    /// The submitted password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// Email or username already belongs to a live user.
    #[error("{0}")]
    Duplicate(UniqueField),

    /// The uniqueness lookup failed.
    #[error("user lookup failed: {0}")]
    Lookup(RepositoryError),

    /// The password could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// The insert failed for a reason other than a duplicate.
    #[error("user insert failed: {0}")]
    Insert(RepositoryError),
}

impl From<ValidationError> for CreateUserError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Duplicate(field) => Self::Duplicate(field),
            ValidationError::Lookup(e) => Self::Lookup(e),
        }
    }
}

/// Creates users against a borrowed store.
pub struct UserService<'a> {
    store: &'a dyn EntityStore,
}

impl<'a> UserService<'a> {
    /// Create a new user service.
    #[must_use]
    pub const fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    /// Validate, hash and insert a user.
    ///
    /// Nothing is written unless every step before the insert succeeds. A
    /// unique violation at insert time is reported the same way as one found
    /// by the pre-check.
    ///
    /// # Errors
    ///
    /// Returns `CreateUserError` describing the first step that failed.
    pub async fn create(&self, registration: UserRegistration) -> Result<User, CreateUserError> {
        if registration.password.expose_secret().is_empty() {
            return Err(CreateUserError::EmptyPassword);
        }

        ensure_user_available(self.store, &registration).await?;

        let password = hash_password(&registration.password)?;
        let new_user = NewUser::from_registration(registration, password);

        let user = self
            .store
            .insert_user(&new_user)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(field) => CreateUserError::Duplicate(field),
                other => CreateUserError::Insert(other),
            })?;

        tracing::info!(user_id = %user.id(), "User created");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ecommerce_core::UserId;

    use super::*;
    use crate::db::memory::{Fault, MemoryStore};
    use crate::services::password::verify_password;

    fn registration(username: &str, email: &str, password: &str) -> UserRegistration {
        serde_json::from_value(serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
            "first_name": "Ada",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_stores_hash() {
        let store = MemoryStore::new();
        let user = UserService::new(&store)
            .create(registration("ada", "ada@example.com", "secret123"))
            .await
            .unwrap();

        assert_eq!(user.id(), UserId::new(1));
        assert_eq!(user.first_name.as_deref(), Some("Ada"));
        assert_ne!(user.password.as_str(), "secret123");
        assert!(verify_password("secret123", &user.password).unwrap());

        let stored = store.users().await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.first().unwrap().password, user.password);
    }

    #[tokio::test]
    async fn test_duplicate_email_writes_nothing() {
        let store = MemoryStore::new();
        let service = UserService::new(&store);
        service
            .create(registration("ada", "ada@example.com", "secret123"))
            .await
            .unwrap();

        let err = service
            .create(registration("ada2", "ada@example.com", "secret123"))
            .await
            .unwrap_err();

        assert!(matches!(err, CreateUserError::Duplicate(UniqueField::Email)));
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_conflict_matches_precheck() {
        let store = MemoryStore::with_fault(Fault::StaleLookups);
        let service = UserService::new(&store);
        service
            .create(registration("ada", "ada@example.com", "secret123"))
            .await
            .unwrap();

        let err = service
            .create(registration("ada", "ada@example.com", "secret123"))
            .await
            .unwrap_err();

        assert!(matches!(err, CreateUserError::Duplicate(UniqueField::Email)));
        assert_eq!(store.users().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let store = MemoryStore::new();
        let err = UserService::new(&store)
            .create(registration("ada", "ada@example.com", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, CreateUserError::EmptyPassword));
        assert!(store.users().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_failures() {
        let store = MemoryStore::with_fault(Fault::Lookups);
        let err = UserService::new(&store)
            .create(registration("ada", "ada@example.com", "secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, CreateUserError::Lookup(_)));

        let store = MemoryStore::with_fault(Fault::Inserts);
        let err = UserService::new(&store)
            .create(registration("ada", "ada@example.com", "secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, CreateUserError::Insert(_)));
    }
}
