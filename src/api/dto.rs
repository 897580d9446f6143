use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::models::{format_timestamp, AlertStatus, Reading, RelayStatus, Threshold};

/// Body of `last_relay_on_time` when the relay has never been on.
pub const NO_RELAY_ON_SENTINEL: &str = "No ON status found";

/// Response for `GET /status`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusDto {
    /// Degrees Celsius
    pub temp: f64,
    /// Relative humidity percentage
    pub hum: f64,
    pub status: AlertStatus,
}

impl From<Reading> for StatusDto {
    fn from(r: Reading) -> Self {
        Self {
            status: r.status(),
            temp: r.temperature,
            hum: r.humidity,
        }
    }
}

/// One entry of `GET /history`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    pub id: i64,
    pub temp: f64,
    pub hum: f64,
    /// Capture time, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    pub relay_status: RelayStatus,
}

impl From<Reading> for ReadingDto {
    fn from(r: Reading) -> Self {
        Self {
            id: r.id,
            temp: r.temperature,
            hum: r.humidity,
            timestamp: format_timestamp(&r.recorded_at),
            relay_status: r.relay_status,
        }
    }
}

/// Response for `GET /relay-on-time`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RelayOnTimeDto {
    /// Timestamp of the newest ON reading, or `"No ON status found"`.
    pub last_relay_on_time: String,
}

impl From<Option<Reading>> for RelayOnTimeDto {
    fn from(r: Option<Reading>) -> Self {
        Self {
            last_relay_on_time: r
                .map(|r| format_timestamp(&r.recorded_at))
                .unwrap_or_else(|| NO_RELAY_ON_SENTINEL.to_owned()),
        }
    }
}

/// Form body for `POST /update-threshold`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateThresholdForm {
    /// User whose thresholds are replaced.
    pub id: i64,
    pub temp_threshold: f64,
    pub hum_threshold: f64,
}

/// Response for `GET /thresholds/{user_id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThresholdDto {
    pub user_id: i64,
    pub temp_threshold: f64,
    pub hum_threshold: f64,
}

impl From<Threshold> for ThresholdDto {
    fn from(t: Threshold) -> Self {
        Self {
            user_id: t.user_id,
            temp_threshold: t.temperature_threshold,
            hum_threshold: t.humidity_threshold,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}
