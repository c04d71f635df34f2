pub mod actuator;
pub mod dashboard;
pub mod health;
mod rate_limit;
pub mod readings;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use rate_limit::{rate_limit_response, ClientIpKeyExtractor};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::{AppError, AppResult};

/// Request bodies are four numbers at most.
const WRITE_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        readings::get_snapshot,
        readings::ingest_reading,
        actuator::get_led_status,
        actuator::update_led_status,
    ),
    components(
        schemas(
            readings::IngestRequest,
            readings::IngestResponse,
            readings::SnapshotResponse,
            actuator::ActuatorRequest,
            actuator::LedStatusResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "readings", description = "Sensor ingestion and latest snapshot"),
        (name = "actuator", description = "LED command bit"),
    ),
    info(
        title = "VIP027 Telemetry API",
        description = "Sensor telemetry ingestion and LED control",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
    } else {
        tracing::info!(
            write_rate = %format!("1 per {}ms burst {}", config.rate_limit_write_replenish_ms, config.rate_limit_write_burst),
            "Rate limiting configured"
        );
    }

    // Polled by every open dashboard; never rate limited
    let read_routes = Router::new()
        .route("/snapshot", get(readings::get_snapshot))
        .route("/actuator", get(actuator::get_led_status))
        // Paths used by already-deployed firmware and pages
        .route("/api/get", get(readings::get_snapshot))
        .route("/api/iot", get(actuator::get_led_status));

    let write_routes_base = Router::new()
        .route("/ingest", post(readings::ingest_reading))
        .route("/actuator", put(actuator::update_led_status))
        .route(
            "/api/iot",
            post(readings::ingest_reading).put(actuator::update_led_status),
        );

    let write_routes = if config.disable_rate_limiting {
        write_routes_base
    } else {
        match GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor)
            .per_millisecond(config.rate_limit_write_replenish_ms)
            .burst_size(config.rate_limit_write_burst)
            .error_handler(rate_limit_response)
            .finish()
        {
            Some(limiter) => write_routes_base.layer(GovernorLayer {
                config: Arc::new(limiter),
            }),
            None => {
                tracing::error!("Invalid rate limit settings, write routes are NOT rate limited");
                write_routes_base
            }
        }
    }
    .layer(RequestBodyLimitLayer::new(WRITE_BODY_LIMIT_BYTES));

    let api_routes = Router::new()
        .merge(read_routes)
        .merge(write_routes)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ));

    // Health check and docs (NO rate limiting, default caching)
    let health_routes = Router::new().route("/healthz", get(health::healthz));
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .route("/", get(dashboard::dashboard))
        .merge(api_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn route_not_found() -> AppResult<()> {
    Err(AppError::NotFound("Route not found".to_string()))
}

async fn method_not_allowed() -> AppResult<()> {
    Err(AppError::MethodNotAllowed("Method not allowed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::path::Operation;

    fn statuses(operation: Option<&Operation>) -> Vec<String> {
        operation
            .map(|op| op.responses.responses.keys().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn read_and_write_operations_document_server_errors() {
        let doc = ApiDoc::openapi();
        let actuator = &doc.paths.paths["/actuator"];
        let snapshot = &doc.paths.paths["/snapshot"];

        for documented in [
            statuses(actuator.get.as_ref()),
            statuses(actuator.put.as_ref()),
            statuses(snapshot.get.as_ref()),
        ] {
            assert!(documented.iter().any(|s| s == "500"), "{documented:?}");
        }
    }
}
