use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Readings above either limit put the sensor into [`AlertStatus::Alert`].
pub const TEMPERATURE_ALERT_LIMIT: f64 = 26.0;
pub const HUMIDITY_ALERT_LIMIT: f64 = 70.0;

/// Wall-clock format used for every timestamp leaving the API.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Mirrors the `relay_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "relay_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RelayStatus {
    On,
    Off,
}

impl fmt::Display for RelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelayStatus::On => "ON",
            RelayStatus::Off => "OFF",
        })
    }
}

/// Classification of the most recent reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AlertStatus {
    Normal,
    Alert,
}

impl AlertStatus {
    /// Limits are exclusive: exactly 26 °C or 70 % is still `Normal`.
    pub fn classify(temperature: f64, humidity: f64) -> Self {
        if temperature > TEMPERATURE_ALERT_LIMIT || humidity > HUMIDITY_ALERT_LIMIT {
            AlertStatus::Alert
        } else {
            AlertStatus::Normal
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    pub recorded_at: NaiveDateTime,
    pub relay_status: RelayStatus,
}

impl Reading {
    pub fn status(&self) -> AlertStatus {
        AlertStatus::classify(self.temperature, self.humidity)
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Threshold {
    pub user_id: i64,
    pub temperature_threshold: f64,
    pub humidity_threshold: f64,
}

/// Result of a threshold update, encoded as the literal response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Success,
    /// No row matched, or the row already held the submitted values.
    NoChange,
}

impl UpdateOutcome {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows > 0 {
            UpdateOutcome::Success
        } else {
            UpdateOutcome::NoChange
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpdateOutcome::Success => "success",
            UpdateOutcome::NoChange => "no_change",
        }
    }
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
