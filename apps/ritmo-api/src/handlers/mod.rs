//! HTTP handlers, one module per resource.

pub mod companies;
pub mod offers;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::warn;

use crate::AppState;

/// GET /health - Liveness plus a check that the storage directory exists.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.store.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        warn!(path = %state.store.path().display(), "Storage directory unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, "storage unavailable")
    }
}
