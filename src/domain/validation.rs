//! Validation - Reading Filter
//!
//! Keeps only samples that carry a timestamp and six finite channels.
//! Total by construction: malformed samples are dropped, order is preserved.

use crate::domain::reading::{RawSensorReading, SensorReading};

/// Validate a single raw sample
pub fn validate_reading(raw: RawSensorReading) -> Option<SensorReading> {
    let timestamp = raw.timestamp.filter(|t| !t.is_empty())?;
    Some(SensorReading {
        timestamp,
        accelerometer_x: finite(raw.accelerometer_x)?,
        accelerometer_y: finite(raw.accelerometer_y)?,
        accelerometer_z: finite(raw.accelerometer_z)?,
        inclinometer: finite(raw.inclinometer)?,
        extensometer: finite(raw.extensometer)?,
        piezometer: finite(raw.piezometer)?,
    })
}

/// Validate a batch, returning the valid subsequence in input order
pub fn validate_readings<I>(raw: I) -> Vec<SensorReading>
where
    I: IntoIterator<Item = RawSensorReading>,
{
    raw.into_iter().filter_map(validate_reading).collect()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
