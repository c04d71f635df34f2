use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One ingested sensor snapshot.
///
/// Every column except `led_status` is written once at ingestion time.
/// `led_status` is the actuator command bit and is overwritten in place.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sensor_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ultrasonic: f64,
    pub led_ultrasonic: f64,
    pub ldr: f64,
    pub led_ldr_pin: f64,
    pub led_status: i16,
    pub recorded_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
