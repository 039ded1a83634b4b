//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::models::HashedPassword;

/// Errors from the password hasher.
#[derive(Debug, Error)]
pub enum HashError {
    /// The hasher itself failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The stored value is not a PHC string.
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a password using Argon2id with default parameters and a random salt.
///
/// # Errors
///
/// Returns `HashError::Hash` if the hasher rejects the input.
pub fn hash_password(password: &SecretString) -> Result<HashedPassword, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map(|hash| HashedPassword::from_phc(hash.to_string()))
        .map_err(|e| HashError::Hash(e.to_string()))
}

/// Check a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on a mismatch.
///
/// # Errors
///
/// Returns `HashError::MalformedHash` if `hash` cannot be parsed, or
/// `HashError::Hash` if verification fails for another reason.
pub fn verify_password(password: &str, hash: &HashedPassword) -> Result<bool, HashError> {
    let parsed_hash =
        PasswordHash::new(hash.as_str()).map_err(|e| HashError::MalformedHash(e.to_string()))?;
    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashError::Hash(e.to_string())),
    }
}
