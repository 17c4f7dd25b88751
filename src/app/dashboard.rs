//! Dashboard - Console Rendering of Service Events
//!
//! Turns [`AppEvent`]s into printable lines. Sensor commits render the
//! current snapshot; everything else goes through the log ring buffer.

use crate::eventing::app_event::AppEvent;
use crate::state::log_state::LogState;
use crate::state::sensor_state::{SensorState, SensorStore};
use crate::utils::format::{format_log_entry, format_snapshot};

pub struct Dashboard {
    log: LogState,
    chart_window: usize,
    last_logged: u64,
}

impl Dashboard {
    pub fn new(chart_window: usize) -> Self {
        Self {
            log: LogState::default(),
            chart_window,
            last_logged: 0,
        }
    }

    /// Line to print for `event`, if any
    pub fn handle(&mut self, event: &AppEvent, store: &SensorStore) -> Option<String> {
        if let AppEvent::SensorDataCommitted { cycle, .. } = event {
            return Some(store.read(|state| self.render(*cycle, state)));
        }

        self.log.record(event);
        let entry = self.log.last()?;
        if entry.id == self.last_logged {
            return None;
        }
        self.last_logged = entry.id;
        Some(format_log_entry(entry))
    }

    pub fn log(&self) -> &LogState {
        &self.log
    }

    fn render(&self, cycle: u64, state: &SensorState) -> String {
        let mut line = format!("#{cycle} {}", format_snapshot(state));
        if let Some(trend) = extensometer_trend(state, self.chart_window) {
            line.push_str(&format!(" | ext {trend:+.2}mm/{}", self.chart_window));
        }
        line
    }
}

/// Extensometer change across the chart window; needs two readings
pub fn extensometer_trend(state: &SensorState, window: usize) -> Option<f64> {
    match state.chart_window(window) {
        [first, .., last] => Some(last.extensometer - first.extensometer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::SensorReading;
    use crate::state::log_state::LogLevel;

    fn reading(ts: &str, ext: f64) -> SensorReading {
        SensorReading {
            timestamp: ts.to_string(),
            accelerometer_x: 0.0,
            accelerometer_y: 0.0,
            accelerometer_z: 0.0,
            inclinometer: 1.0,
            extensometer: ext,
            piezometer: 100.0,
        }
    }

    fn loaded_store(readings: Vec<SensorReading>) -> SensorStore {
        let store = SensorStore::new();
        store.write(|s| {
            s.begin_cycle();
            s.commit_readings(readings, Vec::new());
            s.finish_cycle();
        });
        store
    }

    #[test]
    fn commit_renders_snapshot_with_trend() {
        let store = loaded_store(vec![
            reading("2025-01-10T08:00:00", 2.0),
            reading("2025-01-10T08:00:05", 2.5),
            reading("2025-01-10T08:00:10", 2.75),
        ]);
        let mut dashboard = Dashboard::new(2);

        let line = dashboard
            .handle(
                &AppEvent::SensorDataCommitted {
                    cycle: 3,
                    readings: 3,
                    has_prediction: false,
                },
                &store,
            )
            .expect("line");

        assert!(line.starts_with("#3 08:00:10 "));
        assert!(line.contains("no prediction"));
        assert!(line.ends_with("ext +0.25mm/2"));
    }

    #[test]
    fn trend_needs_two_readings() {
        let store = loaded_store(vec![reading("t", 1.0)]);
        assert_eq!(store.read(|s| extensometer_trend(s, 50)), None);
    }

    #[test]
    fn log_events_print_once() {
        let store = SensorStore::new();
        let mut dashboard = Dashboard::new(50);

        let line = dashboard
            .handle(
                &AppEvent::CycleFailed {
                    cycle: 1,
                    message: "HTTP 500".into(),
                },
                &store,
            )
            .expect("line");
        assert!(line.contains("ERROR"));
        assert!(line.ends_with("Cycle 1 failed: HTTP 500"));

        // Sensor commits render the snapshot and bypass the log
        let rendered = dashboard
            .handle(
                &AppEvent::SensorDataCommitted {
                    cycle: 2,
                    readings: 0,
                    has_prediction: false,
                },
                &store,
            )
            .expect("snapshot");
        assert_eq!(rendered, "#2 loading sensor data...");
        assert_eq!(dashboard.log().len(), 1);
        assert_eq!(dashboard.log().entries()[0].level, LogLevel::Error);
    }
}
