use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::services::readings;

use super::types::{IngestRequest, IngestResponse, SnapshotResponse};

/// Get the latest snapshot
///
/// Returns the record with the most recent `recorded_at` (highest id on ties).
#[utoipa::path(
    get,
    path = "/snapshot",
    responses(
        (status = 200, description = "Latest sensor record", body = SnapshotResponse),
        (status = 404, description = "No data found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn get_snapshot(State(state): State<AppState>) -> AppResult<Json<SnapshotResponse>> {
    let record = readings::latest(&state.db).await?;
    Ok(Json(record.into()))
}

/// Ingest a sensor reading
///
/// Creates a new record on every call. Retries are the caller's concern.
#[utoipa::path(
    post,
    path = "/ingest",
    request_body = IngestRequest,
    responses(
        (status = 201, description = "Reading stored", body = IngestResponse),
        (status = 400, description = "Invalid data format"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "readings"
)]
pub async fn ingest_reading(
    State(state): State<AppState>,
    payload: Result<Json<IngestRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<IngestResponse>)> {
    let Json(request) = payload?;

    let record = readings::insert_reading(&state.db, request.into()).await?;
    tracing::info!(
        id = record.id,
        ultrasonic = record.ultrasonic,
        ldr = record.ldr,
        "Ingested sensor reading"
    );

    Ok((StatusCode::CREATED, Json(record.into())))
}
