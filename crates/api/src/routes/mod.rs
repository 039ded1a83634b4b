//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Welcome message
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (pings the store)
//!
//! # Users
//! POST /users                   - Create a user
//! POST /users/                  - Same, trailing slash
//!
//! # Products
//! POST /products                - Create a product
//! POST /products/               - Same, trailing slash
//! ```

pub mod home;
pub mod products;
pub mod users;

use axum::{
    Router,
    http::{Request, Response},
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// All API routes, without state or middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .route("/users", post(users::create))
        .route("/users/", post(users::create))
        .route("/products", post(products::create))
        .route("/products/", post(products::create))
}

/// The full application: routes, request tracing and request IDs.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
