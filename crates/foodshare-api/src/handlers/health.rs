//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (store, reachable) = state.donation_service.store_health().await;
    let status = match reachable {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(store, error = %e, "Store health check failed");
            "degraded"
        }
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: store.to_string(),
    }))
}
