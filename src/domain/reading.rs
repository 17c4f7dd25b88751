//! Reading - Sensor Samples as Fetched and as Validated

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A sample exactly as the backend sent it
///
/// Every field is optional so that one malformed record never fails the
/// decoding of a whole batch. Non-numeric and non-finite values decode to
/// `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSensorReading {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accelerometer_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accelerometer_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accelerometer_z: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub inclinometer: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub extensometer: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub piezometer: Option<f64>,
}

/// A validated sample: timestamp present, six finite channels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    /// Timestamp as sent by the backend (ISO-8601)
    pub timestamp: String,
    /// Acceleration, g
    pub accelerometer_x: f64,
    pub accelerometer_y: f64,
    pub accelerometer_z: f64,
    /// Tilt, degrees
    pub inclinometer: f64,
    /// Displacement, millimeters
    pub extensometer: f64,
    /// Pore water pressure, kilopascals
    pub piezometer: f64,
}

impl SensorReading {
    /// Parse the timestamp, accepting RFC 3339 and zone-less ISO forms
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// Channels in the order the inference endpoint expects
    pub fn features(&self) -> [f64; 6] {
        [
            self.accelerometer_x,
            self.accelerometer_y,
            self.accelerometer_z,
            self.inclinometer,
            self.extensometer,
            self.piezometer,
        ]
    }
}

impl From<SensorReading> for RawSensorReading {
    fn from(reading: SensorReading) -> Self {
        Self {
            timestamp: Some(reading.timestamp),
            accelerometer_x: Some(reading.accelerometer_x),
            accelerometer_y: Some(reading.accelerometer_y),
            accelerometer_z: Some(reading.accelerometer_z),
            inclinometer: Some(reading.inclinometer),
            extensometer: Some(reading.extensometer),
            piezometer: Some(reading.piezometer),
        }
    }
}

/// Parse a backend timestamp into naive (wall clock) time
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite()))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
