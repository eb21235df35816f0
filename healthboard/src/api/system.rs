//! Process-level endpoints
//!
//! - `/healthz` - liveness, always 200
//! - `/readyz` - 200 once the first snapshot has been published
//! - `/metrics` - Prometheus text exposition

use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

/// Liveness probe handler
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe handler
///
/// Returns 503 until the first probe cycle has completed.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    if state.store.has_snapshot().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Prometheus metrics handler
pub async fn metrics(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
