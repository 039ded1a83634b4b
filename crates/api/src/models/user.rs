//! User domain types.

use core::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

use ecommerce_core::{Email, UserId};

use super::{Audit, RequiredText};

/// An Argon2 PHC string (`$argon2id$v=19$...`).
///
/// Only [`crate::services::password::hash_password`] and the stores create
/// values of this type, which is what keeps plaintext out of the `password`
/// column.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap a PHC string produced by the hasher or read back from the store.
    pub(crate) const fn from_phc(phc: String) -> Self {
        Self(phc)
    }

    /// The PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([REDACTED])")
    }
}

/// A persisted user.
///
/// `password` is serialized as its hash; the plaintext is never part of this
/// type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    #[serde(flatten)]
    pub audit: Audit<UserId>,
    pub username: String,
    pub email: Email,
    pub password: HashedPassword,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// The user's ID.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.audit.id
    }
}

/// Payload of a user creation request.
///
/// The password is held in a [`SecretString`] from the moment it is decoded,
/// so it cannot end up in logs through `Debug`.
#[derive(Debug, Deserialize)]
pub struct UserRegistration {
    pub username: RequiredText,
    pub email: Email,
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// A user ready to be inserted: validated fields and a hashed password.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: RequiredText,
    pub email: Email,
    pub password: HashedPassword,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    /// Combine a registration with the hash of its password.
    #[must_use]
    pub fn from_registration(registration: UserRegistration, password: HashedPassword) -> Self {
        let UserRegistration {
            username,
            email,
            first_name,
            last_name,
            ..
        } = registration;

        Self {
            username,
            email,
            password,
            first_name,
            last_name,
        }
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_registration_decodes_optional_names() {
        let registration: UserRegistration = serde_json::from_str(
            r#"{"username":"ada","email":"ada@example.com","password":"secret123"}"#,
        )
        .unwrap();

        assert_eq!(registration.username.as_str(), "ada");
        assert_eq!(registration.password.expose_secret(), "secret123");
        assert!(registration.first_name.is_none());
    }

    #[test]
    fn test_registration_debug_hides_password() {
        let registration: UserRegistration = serde_json::from_str(
            r#"{"username":"ada","email":"ada@example.com","password":"secret123"}"#,
        )
        .unwrap();

        assert!(!format!("{registration:?}").contains("secret123"));
    }

    #[test]
    fn test_registration_requires_email() {
        let err = serde_json::from_str::<UserRegistration>(
            r#"{"username":"ada","password":"secret123"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing field `email`"));
    }

    #[test]
    fn test_user_serializes_flat_with_hash() {
        let user = User {
            audit: Audit::created(UserId::new(1), Utc::now()),
            username: "ada".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            password: HashedPassword::from_phc("$argon2id$v=19$stub".to_owned()),
            first_name: None,
            last_name: Some("Lovelace".to_owned()),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["password"], "$argon2id$v=19$stub");
        assert!(json["deleted_at"].is_null());
        assert!(!format!("{user:?}").contains("stub"));
    }
}
