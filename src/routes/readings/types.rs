use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::sensor_records;
use crate::services::readings::NewReading;

/// Ingestion payload.
///
/// The legacy firmware field names (`SANG`, `SANG_LED`, `UNP`, `UNP_LED`) are
/// accepted as aliases.
#[derive(Debug, Deserialize, ToSchema)]
pub struct IngestRequest {
    /// Ultrasonic distance
    #[serde(alias = "SANG")]
    #[schema(example = 12.5)]
    pub ultrasonic: f64,
    /// State of the ultrasonic-linked LED
    #[serde(alias = "SANG_LED")]
    #[schema(example = 1)]
    pub led_ultrasonic: f64,
    /// LDR light level
    #[serde(alias = "UNP")]
    #[schema(example = 300)]
    pub ldr: f64,
    /// State of the LDR-linked LED pin
    #[serde(alias = "UNP_LED")]
    #[schema(example = 0)]
    pub led_ldr_pin: f64,
}

impl From<IngestRequest> for NewReading {
    fn from(req: IngestRequest) -> Self {
        Self {
            ultrasonic: req.ultrasonic,
            led_ultrasonic: req.led_ultrasonic,
            ldr: req.ldr,
            led_ldr_pin: req.led_ldr_pin,
        }
    }
}

/// Stored measurement fields, echoed back after ingestion.
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub ultrasonic: f64,
    pub led_ultrasonic: f64,
    pub ldr: f64,
    pub led_ldr_pin: f64,
}

impl From<sensor_records::Model> for IngestResponse {
    fn from(r: sensor_records::Model) -> Self {
        Self {
            ultrasonic: r.ultrasonic,
            led_ultrasonic: r.led_ultrasonic,
            ldr: r.ldr,
            led_ldr_pin: r.led_ldr_pin,
        }
    }
}

/// A full sensor record.
#[derive(Debug, Serialize, ToSchema)]
pub struct SnapshotResponse {
    pub id: i32,
    pub ultrasonic: f64,
    pub led_ultrasonic: f64,
    pub ldr: f64,
    pub led_ldr_pin: f64,
    /// Actuator command bit (0 or 1)
    pub led_status: i16,
    pub recorded_at: DateTime<Utc>,
}

impl From<sensor_records::Model> for SnapshotResponse {
    fn from(r: sensor_records::Model) -> Self {
        Self {
            id: r.id,
            ultrasonic: r.ultrasonic,
            led_ultrasonic: r.led_ultrasonic,
            ldr: r.ldr,
            led_ldr_pin: r.led_ldr_pin,
            led_status: r.led_status,
            recorded_at: r.recorded_at.with_timezone(&Utc),
        }
    }
}
