//! Health - Per-Sensor Battery and Accuracy Status

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::{
    ACCURACY_ACCEPTABLE_ABOVE, ACCURACY_EXCELLENT_ABOVE, BATTERY_FULL_HOURS, BATTERY_GOOD_ABOVE,
    BATTERY_LOW_ABOVE,
};

/// Name shown for a record whose sensor name is missing or not a string
pub const UNKNOWN_SENSOR: &str = "Unknown";

/// Operating status of one sensor, trusted as sent
///
/// Text fields are lenient: a `null` or non-string name becomes
/// [`UNKNOWN_SENSOR`] and a `null` timestamp becomes empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorHealth {
    /// Sensor identifier, unique within a batch
    #[serde(default = "unknown_sensor", deserialize_with = "string_or_unknown")]
    pub sensor_name: String,
    /// Remaining battery, percent
    pub battery_life: f64,
    /// Measurement accuracy, percent
    pub accuracy: f64,
    /// Last report time as sent by the backend
    #[serde(default, deserialize_with = "string_or_empty")]
    pub last_updated: String,
}

fn unknown_sensor() -> String {
    UNKNOWN_SENSOR.to_string()
}

fn string_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => unknown_sensor(),
    })
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

/// Decode a health batch record by record
///
/// Records without numeric battery or accuracy are dropped so one bad
/// entry never discards the rest of the batch.
pub fn decode_health_batch(values: Vec<Value>) -> Vec<SensorHealth> {
    let total = values.len();
    let records: Vec<SensorHealth> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if records.len() < total {
        tracing::debug!(
            "Dropped {} of {} undecodable health records",
            total - records.len(),
            total
        );
    }
    records
}

impl SensorHealth {
    pub fn battery_status(&self) -> BatteryStatus {
        BatteryStatus::from_level(self.battery_life)
    }

    pub fn accuracy_grade(&self) -> AccuracyGrade {
        AccuracyGrade::from_accuracy(self.accuracy)
    }

    /// Estimated hours of operation left, assuming a linear drain
    pub fn estimated_hours_remaining(&self) -> u32 {
        (self.battery_life / 100.0 * BATTERY_FULL_HOURS).round().max(0.0) as u32
    }

    /// A sensor counts as active while its battery is above the low threshold
    pub fn is_active(&self) -> bool {
        self.battery_life > BATTERY_LOW_ABOVE
    }
}

/// Battery classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryStatus {
    Good,
    Low,
    Critical,
}

impl BatteryStatus {
    pub fn from_level(level: f64) -> Self {
        if level > BATTERY_GOOD_ABOVE {
            BatteryStatus::Good
        } else if level > BATTERY_LOW_ABOVE {
            BatteryStatus::Low
        } else {
            BatteryStatus::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BatteryStatus::Good => "Good",
            BatteryStatus::Low => "Low",
            BatteryStatus::Critical => "Critical",
        }
    }
}

/// Accuracy classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyGrade {
    Excellent,
    Acceptable,
    Degraded,
}

impl AccuracyGrade {
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy > ACCURACY_EXCELLENT_ABOVE {
            AccuracyGrade::Excellent
        } else if accuracy > ACCURACY_ACCEPTABLE_ABOVE {
            AccuracyGrade::Acceptable
        } else {
            AccuracyGrade::Degraded
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccuracyGrade::Excellent => "Excellent accuracy",
            AccuracyGrade::Acceptable => "Good accuracy",
            AccuracyGrade::Degraded => "Calibration recommended",
        }
    }
}

/// Fleet-wide aggregate over one health batch
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HealthSummary {
    pub total: usize,
    pub active: usize,
    /// `None` when there are no records
    pub average_accuracy: Option<f64>,
    pub average_battery: Option<f64>,
}

impl HealthSummary {
    pub fn from_records(records: &[SensorHealth]) -> Self {
        let total = records.len();
        if total == 0 {
            return Self::default();
        }

        let n = total as f64;
        Self {
            total,
            active: records.iter().filter(|r| r.is_active()).count(),
            average_accuracy: Some(records.iter().map(|r| r.accuracy).sum::<f64>() / n),
            average_battery: Some(records.iter().map(|r| r.battery_life).sum::<f64>() / n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(name: &str, battery: f64, accuracy: f64) -> SensorHealth {
        SensorHealth {
            sensor_name: name.to_string(),
            battery_life: battery,
            accuracy,
            last_updated: "2025-01-10T08:30:00".to_string(),
        }
    }

    #[test]
    fn battery_thresholds_are_exclusive() {
        assert_eq!(BatteryStatus::from_level(80.0), BatteryStatus::Good);
        assert_eq!(BatteryStatus::from_level(50.0), BatteryStatus::Low);
        assert_eq!(BatteryStatus::from_level(25.5), BatteryStatus::Low);
        assert_eq!(BatteryStatus::from_level(25.0), BatteryStatus::Critical);
        assert_eq!(BatteryStatus::from_level(0.0), BatteryStatus::Critical);
    }

    #[test]
    fn accuracy_grades() {
        assert_eq!(AccuracyGrade::from_accuracy(99.0), AccuracyGrade::Excellent);
        assert_eq!(AccuracyGrade::from_accuracy(95.0), AccuracyGrade::Acceptable);
        assert_eq!(AccuracyGrade::from_accuracy(90.0), AccuracyGrade::Degraded);
    }

    #[test]
    fn hours_remaining() {
        assert_eq!(sensor("a", 100.0, 99.0).estimated_hours_remaining(), 48);
        assert_eq!(sensor("a", 50.0, 99.0).estimated_hours_remaining(), 24);
        assert_eq!(sensor("a", 1.0, 99.0).estimated_hours_remaining(), 0);
    }

    #[test]
    fn summary_over_records() {
        let records = vec![
            sensor("Accelerometer", 90.0, 98.0),
            sensor("Inclinometer", 20.0, 92.0),
            sensor("Piezometer", 40.0, 96.0),
        ];
        let summary = HealthSummary::from_records(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.average_battery, Some(50.0));
        let accuracy = summary.average_accuracy.expect("average");
        assert!((accuracy - 95.333).abs() < 1e-3);
    }

    #[test]
    fn summary_of_nothing() {
        let summary = HealthSummary::from_records(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.average_accuracy.is_none());
    }

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{"sensorName": "Extensometer", "batteryLife": 77.0, "accuracy": 93, "lastUpdated": ""}"#;
        let health: SensorHealth = serde_json::from_str(json).expect("decode");
        assert_eq!(health.sensor_name, "Extensometer");
        assert_eq!(health.accuracy, 93.0);
        assert_eq!(health.battery_status(), BatteryStatus::Good);
    }

    #[test]
    fn null_text_fields_do_not_fail_the_record() {
        let json = r#"{"sensorName": null, "batteryLife": 64.0, "accuracy": 97.5, "lastUpdated": null}"#;
        let health: SensorHealth = serde_json::from_str(json).expect("decode");
        assert_eq!(health.sensor_name, UNKNOWN_SENSOR);
        assert_eq!(health.last_updated, "");
        assert_eq!(health.accuracy_grade(), AccuracyGrade::Excellent);
    }

    #[test]
    fn batch_keeps_decodable_records() {
        let values = vec![
            serde_json::json!({"sensorName": "Piezometer", "batteryLife": 88.0, "accuracy": 99.0, "lastUpdated": "2025-01-10T08:30:00"}),
            serde_json::json!({"sensorName": null, "batteryLife": 30.0, "accuracy": 91.0, "lastUpdated": null}),
            serde_json::json!({"batteryLife": 55.0, "accuracy": 96.0}),
            serde_json::json!({"sensorName": "Inclinometer", "batteryLife": "n/a", "accuracy": 90.0}),
        ];

        let records = decode_health_batch(values);
        let names: Vec<&str> = records.iter().map(|r| r.sensor_name.as_str()).collect();
        assert_eq!(names, vec!["Piezometer", UNKNOWN_SENSOR, UNKNOWN_SENSOR]);
        assert_eq!(records[1].battery_status(), BatteryStatus::Low);
    }
}
