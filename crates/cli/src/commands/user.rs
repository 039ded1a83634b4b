//! User management commands.
//!
//! # Usage
//!
//! ```bash
//! ECOMMERCE_USER_PASSWORD=... ecommerce user create -u ada -e ada@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `ECOMMERCE_USER_PASSWORD` - Password for the new user. Never taken from
//!   the command line, where it would end up in shell history.
//! - `DATABASE_URL` or `DB_*` - see `ecommerce_api::config`

use ecommerce_api::config::{ConfigError, DatabaseConfig};
use ecommerce_api::db::{self, PgStore};
use ecommerce_api::models::{RequiredText, RequiredTextError, UserRegistration};
use ecommerce_api::services::{CreateUserError, UserService};
use ecommerce_core::{Email, EmailError, UserId};
use secrecy::SecretString;
use thiserror::Error;

/// Environment variable holding the new user's password.
pub const PASSWORD_ENV_VAR: &str = "ECOMMERCE_USER_PASSWORD";

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Invalid username.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] RequiredTextError),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// The create service refused or failed.
    #[error("Failed to create user: {0}")]
    Create(#[from] CreateUserError),
}

/// Build a registration from command-line values and a password.
fn registration(
    username: &str,
    email: &str,
    password: SecretString,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<UserRegistration, UserCommandError> {
    Ok(UserRegistration {
        username: RequiredText::parse(username)?,
        email: Email::parse(email)?,
        password,
        first_name,
        last_name,
    })
}

/// Create a new user.
///
/// Runs the same uniqueness checks and password hashing as the HTTP
/// endpoint.
///
/// # Returns
///
/// The ID of the created user.
pub async fn create(
    username: &str,
    email: &str,
    first_name: Option<String>,
    last_name: Option<String>,
) -> Result<UserId, UserCommandError> {
    let config = DatabaseConfig::from_env()?;

    let password = std::env::var(PASSWORD_ENV_VAR)
        .map(SecretString::from)
        .map_err(|_| UserCommandError::MissingEnvVar(PASSWORD_ENV_VAR))?;
    let registration = registration(username, email, password, first_name, last_name)?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(config.connect_options()?).await?;
    let store = PgStore::new(pool);

    tracing::info!("Creating user: {} <{}>", registration.username, registration.email);
    let user = UserService::new(&store).create(registration).await?;

    store.pool().close().await;
    tracing::info!("User created successfully! ID: {}", user.id());
    Ok(user.id())
}
