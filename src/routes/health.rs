use axum::{extract::State, http::StatusCode};

use crate::common::AppState;

/// Health check endpoint
///
/// Returns 200 while the store connection answers a ping and 503 otherwise.
/// A lost connection is not re-established in-process, so a failing probe
/// should lead the orchestrator to restart the service.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Database unreachable"),
    ),
    tag = "health"
)]
pub async fn healthz(State(state): State<AppState>) -> StatusCode {
    match state.db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
