//! Format - Formatting Utilities
//!
//! Text renderings of committed state for the console dashboard.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::domain::health::HealthSummary;
use crate::domain::mine::MineInfo;
use crate::domain::prediction::Prediction;
use crate::domain::reading::SensorReading;
use crate::state::log_state::LogEntry;
use crate::state::sensor_state::SensorState;

/// Format a local datetime for display
pub fn format_local_datetime(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format just the time portion
pub fn format_time(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Truncate a string to max characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// Format a percentage, or a dash when unknown
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "-".to_string(),
    }
}

pub fn format_reading(reading: &SensorReading) -> String {
    format!(
        "accel=({:.3}, {:.3}, {:.3}) incl={:.2}° ext={:.2}mm piezo={:.1}kPa",
        reading.accelerometer_x,
        reading.accelerometer_y,
        reading.accelerometer_z,
        reading.inclinometer,
        reading.extensometer,
        reading.piezometer,
    )
}

pub fn format_health_summary(summary: &HealthSummary) -> String {
    format!(
        "sensors {}/{} active, accuracy {}, battery {}",
        summary.active,
        summary.total,
        format_percent(summary.average_accuracy),
        format_percent(summary.average_battery),
    )
}

/// Probability plus per-horizon risk, e.g. `risk 42.5% [3h normal | 6h warning | ...]`
pub fn format_prediction(prediction: &Prediction) -> String {
    let horizons: Vec<String> = prediction
        .horizons()
        .iter()
        .map(|(horizon, level)| format!("{}h {}", horizon.hours(), level.label()))
        .collect();
    format!(
        "risk {:.1}% [{}]",
        prediction.probability,
        horizons.join(" | ")
    )
}

/// One-line status of a snapshot
pub fn format_snapshot(state: &SensorState) -> String {
    if state.is_loading() {
        return "loading sensor data...".to_string();
    }
    if state.is_empty() {
        return format!(
            "no valid readings; {}",
            format_health_summary(&state.health_summary())
        );
    }

    let mut parts = Vec::with_capacity(3);
    if let Some(latest) = state.latest_reading() {
        let at = latest
            .recorded_at()
            .map(|t| format_time(&t))
            .unwrap_or_else(|| latest.timestamp.clone());
        parts.push(format!("{} {}", at, format_reading(latest)));
    }
    parts.push(format_health_summary(&state.health_summary()));
    match state.prediction() {
        Some(prediction) => parts.push(format_prediction(prediction)),
        None => parts.push("no prediction".to_string()),
    }
    parts.join(" | ")
}

pub fn format_mine_info(info: &MineInfo) -> String {
    format!(
        "{} ({}), depth {:.0} m, {} employees",
        info.name, info.location, info.depth, info.employees
    )
}

pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        format_local_datetime(&entry.timestamp),
        entry.level.label(),
        entry.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::RiskLevel;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 6), "hél...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn percent_dash_when_unknown() {
        assert_eq!(format_percent(None), "-");
        assert_eq!(format_percent(Some(95.333)), "95.3%");
    }

    #[test]
    fn prediction_lists_horizons_in_order() {
        let prediction = Prediction {
            location_x: 0.0,
            location_y: 0.0,
            location_z: 0.0,
            probability: 42.5,
            next_3_hours: RiskLevel::Normal,
            next_6_hours: RiskLevel::Warning,
            next_12_hours: RiskLevel::Warning,
            next_24_hours: RiskLevel::Critical,
            timestamp: None,
        };
        assert_eq!(
            format_prediction(&prediction),
            "risk 42.5% [3h normal | 6h warning | 12h warning | 24h critical]"
        );
    }

    #[test]
    fn snapshot_before_first_cycle_is_loading() {
        assert_eq!(format_snapshot(&SensorState::new()), "loading sensor data...");
    }

    #[test]
    fn empty_health_summary() {
        assert_eq!(
            format_health_summary(&HealthSummary::default()),
            "sensors 0/0 active, accuracy -, battery -"
        );
    }
}
