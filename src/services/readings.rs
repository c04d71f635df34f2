//! Data access for the `sensor_records` table.
//!
//! Every operation here is exactly one statement against the store:
//!
//! | Operation | Statement |
//! |-----------|-----------|
//! | [`insert_reading`] | `INSERT ... VALUES (..., COALESCE((SELECT led_status ...), 0), ...) RETURNING *` |
//! | [`latest`] | `SELECT * ... ORDER BY recorded_at DESC, id DESC LIMIT 1` |
//! | [`latest_led_status`] | same as [`latest`], or a primary-key lookup for a singleton target |
//! | [`set_led_status`] | `UPDATE ... SET led_status = ? WHERE id IN (...) RETURNING *` |
//!
//! No transactions or locks are layered on top. Concurrent actuator updates
//! race and the last write wins.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, Func, Order, Query, SelectStatement, SimpleExpr},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::sensor_records;
use crate::error::{AppError, AppResult};

/// Measurements reported by the device for a single ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    pub ultrasonic: f64,
    pub led_ultrasonic: f64,
    pub ldr: f64,
    pub led_ldr_pin: f64,
}

/// Actuator command bit. Stored and exchanged as the number 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "i16")]
pub enum LedState {
    #[default]
    Off,
    On,
}

impl LedState {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl From<LedState> for i16 {
    fn from(state: LedState) -> Self {
        state.as_i16()
    }
}

impl TryFrom<f64> for LedState {
    type Error = AppError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 0.0 {
            Ok(Self::Off)
        } else if value == 1.0 {
            Ok(Self::On)
        } else {
            Err(AppError::Validation("led_status must be 0 or 1".to_string()))
        }
    }
}

impl TryFrom<i16> for LedState {
    type Error = AppError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(f64::from(value))
    }
}

/// Which record an actuator update writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActuatorTarget {
    /// The record that is latest at the time of the update.
    #[default]
    Latest,
    /// A fixed, well-known record.
    Record(i32),
}

impl FromStr for ActuatorTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }

        let id = s
            .strip_prefix("record:")
            .unwrap_or(s)
            .trim()
            .parse::<i32>()
            .map_err(|_| format!("expected 'latest' or 'record:<id>', got '{s}'"))?;

        if id <= 0 {
            return Err(format!("record id must be positive, got {id}"));
        }

        Ok(Self::Record(id))
    }
}

impl fmt::Display for ActuatorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Record(id) => write!(f, "record:{id}"),
        }
    }
}

/// `SELECT <column> FROM sensor_records ORDER BY recorded_at DESC, id DESC LIMIT 1`
fn latest_subquery(column: sensor_records::Column) -> SelectStatement {
    Query::select()
        .column(column)
        .from(sensor_records::Entity)
        .order_by(sensor_records::Column::RecordedAt, Order::Desc)
        .order_by(sensor_records::Column::Id, Order::Desc)
        .limit(1)
        .to_owned()
}

/// Append a new snapshot stamped with the current time.
///
/// The new row inherits `led_status` from the current latest row so that
/// ingestion never silently resets the actuator command.
///
/// # Errors
///
/// Returns `AppError::Persistence` if the insert fails.
pub async fn insert_reading(
    db: &DatabaseConnection,
    reading: NewReading,
) -> AppResult<sensor_records::Model> {
    insert_reading_at(db, reading, Utc::now()).await
}

/// Append a new snapshot with an explicit `recorded_at`.
///
/// # Errors
///
/// Returns `AppError::Persistence` if the insert fails.
pub async fn insert_reading_at(
    db: &DatabaseConnection,
    reading: NewReading,
    recorded_at: DateTime<Utc>,
) -> AppResult<sensor_records::Model> {
    let carried_led_status = Func::coalesce([
        SimpleExpr::SubQuery(
            None,
            Box::new(latest_subquery(sensor_records::Column::LedStatus).into_sub_query_statement()),
        ),
        Expr::val(LedState::Off.as_i16()).into(),
    ]);

    let insert = Query::insert()
        .into_table(sensor_records::Entity)
        .columns([
            sensor_records::Column::Ultrasonic,
            sensor_records::Column::LedUltrasonic,
            sensor_records::Column::Ldr,
            sensor_records::Column::LedLdrPin,
            sensor_records::Column::LedStatus,
            sensor_records::Column::RecordedAt,
        ])
        .values([
            Expr::val(reading.ultrasonic).into(),
            Expr::val(reading.led_ultrasonic).into(),
            Expr::val(reading.ldr).into(),
            Expr::val(reading.led_ldr_pin).into(),
            carried_led_status.into(),
            Expr::val(recorded_at.fixed_offset()).into(),
        ])
        .map_err(|e| AppError::Internal(format!("Failed to build insert: {e}")))?
        .returning_all()
        .to_owned();

    let statement = db.get_database_backend().build(&insert);
    let record = sensor_records::Model::find_by_statement(statement)
        .one(db)
        .await?
        .ok_or_else(|| AppError::Internal("Insert returned no row".to_string()))?;

    tracing::debug!(
        id = record.id,
        led_status = record.led_status,
        recorded_at = %record.recorded_at,
        "Inserted sensor record"
    );

    Ok(record)
}

/// Fetch the latest snapshot: greatest `recorded_at`, then greatest `id`.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the store is empty.
pub async fn latest(db: &DatabaseConnection) -> AppResult<sensor_records::Model> {
    sensor_records::Entity::find()
        .order_by_desc(sensor_records::Column::RecordedAt)
        .order_by_desc(sensor_records::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("No data found".to_string()))
}

/// Fetch the current actuator command bit as seen by `target`.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the target record does not exist, or
/// `AppError::Internal` if the stored value is outside {0, 1}.
pub async fn latest_led_status(
    db: &DatabaseConnection,
    target: ActuatorTarget,
) -> AppResult<LedState> {
    let record = match target {
        ActuatorTarget::Latest => latest(db).await?,
        ActuatorTarget::Record(id) => sensor_records::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("No data found".to_string()))?,
    };

    LedState::try_from(record.led_status).map_err(|_| {
        AppError::Internal(format!(
            "Record {} holds invalid led_status {}",
            record.id, record.led_status
        ))
    })
}

/// Overwrite the actuator command bit on the target record.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no record matches `target`.
pub async fn set_led_status(
    db: &DatabaseConnection,
    target: ActuatorTarget,
    state: LedState,
) -> AppResult<sensor_records::Model> {
    let mut update = Query::update();
    update
        .table(sensor_records::Entity)
        .value(sensor_records::Column::LedStatus, state.as_i16());

    match target {
        ActuatorTarget::Latest => update.and_where(
            sensor_records::Column::Id.in_subquery(latest_subquery(sensor_records::Column::Id)),
        ),
        ActuatorTarget::Record(id) => update.and_where(sensor_records::Column::Id.eq(id)),
    };
    update.returning_all();

    let statement = db.get_database_backend().build(&update);
    let record = sensor_records::Model::find_by_statement(statement)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sensor record not found".to_string()))?;

    tracing::debug!(
        id = record.id,
        %target,
        led_status = record.led_status,
        "Updated LED status"
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn led_state_accepts_only_zero_and_one() {
        assert_eq!(LedState::try_from(0.0).unwrap(), LedState::Off);
        assert_eq!(LedState::try_from(1.0).unwrap(), LedState::On);
        assert!(LedState::try_from(2.0).is_err());
        assert!(LedState::try_from(0.5).is_err());
        assert!(LedState::try_from(-1.0).is_err());
    }

    #[test]
    fn led_state_serializes_as_number() {
        assert_eq!(serde_json::to_string(&LedState::On).unwrap(), "1");
        assert_eq!(serde_json::to_string(&LedState::Off).unwrap(), "0");
    }

    #[test]
    fn actuator_target_parses_both_policies() {
        assert_eq!("latest".parse::<ActuatorTarget>(), Ok(ActuatorTarget::Latest));
        assert_eq!(" LATEST ".parse::<ActuatorTarget>(), Ok(ActuatorTarget::Latest));
        assert_eq!("record:1".parse::<ActuatorTarget>(), Ok(ActuatorTarget::Record(1)));
        assert_eq!("42".parse::<ActuatorTarget>(), Ok(ActuatorTarget::Record(42)));
        assert!("record:".parse::<ActuatorTarget>().is_err());
        assert!("record:0".parse::<ActuatorTarget>().is_err());
        assert!("newest".parse::<ActuatorTarget>().is_err());
    }

    #[test]
    fn actuator_target_display_round_trips() {
        for target in [ActuatorTarget::Latest, ActuatorTarget::Record(7)] {
            assert_eq!(target.to_string().parse::<ActuatorTarget>(), Ok(target));
        }
    }
}
