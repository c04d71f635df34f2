use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::routes::readings::SnapshotResponse;
use crate::services::readings::{self, LedState};

use super::types::{ActuatorRequest, LedStatusResponse};

/// Get the current LED command bit
#[utoipa::path(
    get,
    path = "/actuator",
    responses(
        (status = 200, description = "Current LED status", body = LedStatusResponse),
        (status = 404, description = "No data found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "actuator"
)]
pub async fn get_led_status(State(state): State<AppState>) -> AppResult<Json<LedStatusResponse>> {
    let led_status = readings::latest_led_status(&state.db, state.config.actuator_target).await?;
    Ok(Json(LedStatusResponse { led_status }))
}

/// Set the LED command bit
///
/// Overwrites the bit on the configured target record. Concurrent updates are
/// last-write-wins.
#[utoipa::path(
    put,
    path = "/actuator",
    request_body = ActuatorRequest,
    responses(
        (status = 200, description = "Updated record", body = SnapshotResponse),
        (status = 400, description = "Invalid led_status"),
        (status = 404, description = "Target record not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "actuator"
)]
pub async fn update_led_status(
    State(state): State<AppState>,
    payload: Result<Json<ActuatorRequest>, JsonRejection>,
) -> AppResult<Json<SnapshotResponse>> {
    let Json(request) = payload?;
    let led_state = LedState::try_from(request.led_status)?;

    let target = state.config.actuator_target;
    let record = readings::set_led_status(&state.db, target, led_state).await?;
    tracing::info!(id = record.id, %target, led_status = record.led_status, "LED status updated");

    Ok(Json(record.into()))
}
