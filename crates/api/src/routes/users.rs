//! User route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::error::{ApiJson, Result};
use crate::models::{User, UserRegistration};
use crate::services::UserService;
use crate::state::AppState;

/// Body of a successful user creation.
#[derive(Debug, Serialize)]
pub struct UserCreated {
    pub message: &'static str,
    pub user: User,
}

/// Create a user.
///
/// The stored record, including the password hash, is echoed back.
#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(registration): ApiJson<UserRegistration>,
) -> Result<(StatusCode, Json<UserCreated>)> {
    let user = UserService::new(state.store()).create(registration).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreated {
            message: "User created successfully",
            user,
        }),
    ))
}
