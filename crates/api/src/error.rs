//! Unified error handling with Sentry integration.
//!
//! Every failure becomes an `AppError`, which renders as `{"error": "..."}`
//! with the matching status code. Server-side failures are captured to
//! Sentry and logged before responding; their details never reach the
//! client.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::{RepositoryError, UniqueField};
use crate::services::{CreateProductError, CreateUserError, HashError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be decoded or failed field validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A unique field is already taken.
    #[error("Conflict: {0}")]
    Conflict(UniqueField),

    /// A uniqueness lookup failed.
    #[error("Lookup failed: {0}")]
    Lookup(RepositoryError),

    /// The password hasher failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] HashError),

    /// An insert failed for a reason other than a duplicate.
    #[error("Failed to create {entity}: {source}")]
    CreateFailed {
        entity: &'static str,
        source: RepositoryError,
    },
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Lookup(_) | Self::PasswordHash(_) | Self::CreateFailed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message sent to the client.
    fn client_message(&self) -> String {
        match self {
            Self::BadRequest(reason) => reason.clone(),
            Self::Conflict(field) => field.message().to_string(),
            Self::Lookup(_) => "Internal server error".to_string(),
            Self::PasswordHash(_) => "Failed to hash password".to_string(),
            Self::CreateFailed { entity, .. } => format!("Failed to create {entity}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<CreateUserError> for AppError {
    fn from(err: CreateUserError) -> Self {
        match err {
            CreateUserError::EmptyPassword => Self::BadRequest(err.to_string()),
            CreateUserError::Duplicate(field) => Self::Conflict(field),
            CreateUserError::Lookup(e) => Self::Lookup(e),
            CreateUserError::Hash(e) => Self::PasswordHash(e),
            CreateUserError::Insert(source) => Self::CreateFailed {
                entity: "user",
                source,
            },
        }
    }
}

impl From<CreateProductError> for AppError {
    fn from(err: CreateProductError) -> Self {
        match err {
            CreateProductError::Duplicate(field) => Self::Conflict(field),
            CreateProductError::Lookup(e) => Self::Lookup(e),
            CreateProductError::Insert(source) => Self::CreateFailed {
                entity: "product",
                source,
            },
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// JSON body extractor whose rejections render as `AppError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
