//! SensorState - Committed Sensor Snapshot and Derived Views
//!
//! Readings, health and prediction are each replaced wholesale on commit.
//! Everything else here is derived on demand from the committed values.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::health::{HealthSummary, SensorHealth};
use crate::domain::prediction::Prediction;
use crate::domain::reading::SensorReading;

/// Lifecycle of the polling loop that owns a [`SensorState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    /// Not started
    #[default]
    Idle,
    /// A cycle is in flight
    Loading,
    /// At least one cycle finished and none is in flight
    Ready,
    /// Torn down; no further commits
    Stopped,
}

/// State committed by the polling loop
#[derive(Debug, Clone, Default)]
pub struct SensorState {
    readings: Vec<SensorReading>,
    health: Vec<SensorHealth>,
    prediction: Option<Prediction>,
    phase: PollPhase,
    in_flight: usize,
    loaded: bool,
    completed_cycles: u64,
}

impl SensorState {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Getters ====================

    /// Validated readings, oldest first
    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    pub fn health(&self) -> &[SensorHealth] {
        &self.health
    }

    pub fn prediction(&self) -> Option<&Prediction> {
        self.prediction.as_ref()
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    // ==================== Derived ====================

    /// Newest validated reading
    pub fn latest_reading(&self) -> Option<&SensorReading> {
        self.readings.last()
    }

    /// True until the first cycle has finished, whatever its outcome
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// Loaded, but the backend had no valid readings
    pub fn is_empty(&self) -> bool {
        self.loaded && self.readings.is_empty()
    }

    /// The last `n` readings, oldest first
    pub fn chart_window(&self, n: usize) -> &[SensorReading] {
        let start = self.readings.len().saturating_sub(n);
        &self.readings[start..]
    }

    pub fn health_summary(&self) -> HealthSummary {
        HealthSummary::from_records(&self.health)
    }

    // ==================== Commits ====================

    pub(crate) fn begin_cycle(&mut self) {
        self.in_flight += 1;
        self.phase = PollPhase::Loading;
    }

    pub(crate) fn commit_readings(
        &mut self,
        readings: Vec<SensorReading>,
        health: Vec<SensorHealth>,
    ) {
        self.readings = readings;
        self.health = health;
    }

    pub(crate) fn commit_prediction(&mut self, prediction: Option<Prediction>) {
        self.prediction = prediction;
    }

    pub(crate) fn finish_cycle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loaded = true;
        self.completed_cycles += 1;
        if self.in_flight == 0 {
            self.phase = PollPhase::Ready;
        }
    }

    pub(crate) fn mark_stopped(&mut self) {
        self.phase = PollPhase::Stopped;
    }
}

/// Shared handle to one loop's [`SensorState`]
///
/// Readers take cheap clones via [`SensorStore::snapshot`]; only the polling
/// loop writes.
#[derive(Clone, Debug, Default)]
pub struct SensorStore {
    inner: Arc<RwLock<SensorState>>,
}

impl SensorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> SensorState {
        self.inner.read().clone()
    }

    /// Read without cloning
    pub fn read<R>(&self, f: impl FnOnce(&SensorState) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn latest_reading(&self) -> Option<SensorReading> {
        self.inner.read().latest_reading().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.read().is_loading()
    }

    pub fn phase(&self) -> PollPhase {
        self.inner.read().phase()
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut SensorState) -> R) -> R {
        f(&mut self.inner.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(ts: &str, x: f64) -> SensorReading {
        SensorReading {
            timestamp: ts.to_string(),
            accelerometer_x: x,
            accelerometer_y: 0.1,
            accelerometer_z: 0.0,
            inclinometer: 5.0,
            extensometer: 2.0,
            piezometer: 100.0,
        }
    }

    #[test]
    fn latest_is_last_element() {
        let mut state = SensorState::new();
        assert!(state.latest_reading().is_none());

        state.commit_readings(vec![reading("t1", 0.1), reading("t2", 0.2)], Vec::new());
        assert_eq!(state.latest_reading().map(|r| r.timestamp.as_str()), Some("t2"));

        state.commit_readings(Vec::new(), Vec::new());
        assert!(state.latest_reading().is_none());
    }

    #[test]
    fn loading_clears_after_first_cycle_only() {
        let mut state = SensorState::new();
        assert!(state.is_loading());
        assert_eq!(state.phase(), PollPhase::Idle);

        state.begin_cycle();
        assert_eq!(state.phase(), PollPhase::Loading);
        state.finish_cycle();
        assert!(!state.is_loading());
        assert!(state.is_empty());
        assert_eq!(state.phase(), PollPhase::Ready);

        // Later cycles go back to Loading without resetting the flag.
        state.begin_cycle();
        assert_eq!(state.phase(), PollPhase::Loading);
        assert!(!state.is_loading());
    }

    #[test]
    fn overlapping_cycles_stay_loading_until_all_finish() {
        let mut state = SensorState::new();
        state.begin_cycle();
        state.begin_cycle();
        state.finish_cycle();
        assert_eq!(state.phase(), PollPhase::Loading);
        state.finish_cycle();
        assert_eq!(state.phase(), PollPhase::Ready);
        assert_eq!(state.completed_cycles(), 2);
    }

    #[test]
    fn chart_window_takes_tail() {
        let mut state = SensorState::new();
        let readings: Vec<_> = (0..60).map(|i| reading(&format!("t{i}"), i as f64)).collect();
        state.commit_readings(readings, Vec::new());

        let window = state.chart_window(50);
        assert_eq!(window.len(), 50);
        assert_eq!(window[0].timestamp, "t10");
        assert_eq!(window[49].timestamp, "t59");

        assert_eq!(state.chart_window(100).len(), 60);
        assert!(state.chart_window(0).is_empty());
    }

    #[test]
    fn store_snapshot_is_detached() {
        let store = SensorStore::new();
        let before = store.snapshot();
        store.write(|s| s.commit_readings(vec![reading("t1", 0.1)], Vec::new()));
        assert!(before.readings().is_empty());
        assert_eq!(store.latest_reading().map(|r| r.timestamp), Some("t1".to_string()));
    }
}
