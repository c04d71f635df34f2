//! Shared fixtures: an in-memory SQLite store migrated with the production
//! migrator, and helpers for driving the real router.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use vip_telemetry::common::AppState;
use vip_telemetry::config::{Config, Deployment, LogFormat};
use vip_telemetry::entity::sensor_records;
use vip_telemetry::routes;
use vip_telemetry::services::readings::{ActuatorTarget, NewReading};

pub async fn test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    // A second pooled connection would open a different in-memory database
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts).await.expect("connect to sqlite");
    migration::Migrator::up(&db, None)
        .await
        .expect("run migrations");
    db
}

pub fn test_config(actuator_target: ActuatorTarget) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        api_host: "127.0.0.1".to_string(),
        api_port: 0,
        actuator_target,
        dashboard_poll_interval_ms: 1500,
        disable_rate_limiting: true,
        rate_limit_write_replenish_ms: 100,
        rate_limit_write_burst: 30,
        log_format: LogFormat::Text,
        deployment: Deployment::Local,
    }
}

pub async fn test_app(actuator_target: ActuatorTarget) -> (Router, DatabaseConnection) {
    test_app_with_config(test_config(actuator_target)).await
}

pub async fn test_app_with_config(config: Config) -> (Router, DatabaseConnection) {
    let db = test_db().await;
    let state = AppState::new(db.clone(), config);
    (routes::build_router(state), db)
}

pub fn reading(ultrasonic: f64) -> NewReading {
    NewReading {
        ultrasonic,
        led_ultrasonic: 1.0,
        ldr: 300.0,
        led_ldr_pin: 0.0,
    }
}

pub async fn record_count(db: &DatabaseConnection) -> u64 {
    sensor_records::Entity::find()
        .count(db)
        .await
        .expect("count records")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub text: String,
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
        text,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: &Value) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
