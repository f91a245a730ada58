//! Route definitions for the FoodShare HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .merge(donation_routes())
        .merge(auth_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Donation listing, CRUD, and reservation
fn donation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/donations",
            get(handlers::donation::list_donations).post(handlers::donation::create_donation),
        )
        .route(
            "/donations/categories",
            get(handlers::donation::list_categories),
        )
        .route(
            "/donations/{id}",
            get(handlers::donation::get_donation)
                .patch(handlers::donation::update_donation)
                .delete(handlers::donation::delete_donation),
        )
        .route(
            "/donations/{id}/reserve",
            post(handlers::donation::reserve_donation),
        )
        .route(
            "/donations/{id}/cancel_reservation",
            post(handlers::donation::cancel_reservation),
        )
}

/// Auth endpoints: register, login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
