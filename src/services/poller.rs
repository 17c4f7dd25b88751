//! Sensor Poller
//!
//! Self-restarting polling loop that keeps one [`SensorStore`] in sync with
//! the backend.
//!
//! ## Cycle
//!
//! ```text
//! tick (every interval, measured from cycle start)
//!   │
//!   ▼
//! readings ──► health ──► validate ──► commit readings + health
//!                                            │
//!                          non-empty? ───────┤
//!                            │ yes           │ no
//!                            ▼               ▼
//!                       prediction      commit None
//!                            │
//!                            ▼
//!                     commit prediction
//! ```
//!
//! Cycles are spawned independently, so a slow cycle never delays the next
//! tick and two cycles may overlap; whichever commits last wins.
//!
//! ## Teardown
//!
//! Stopping the handle aborts the timer and releases the [`Liveness`] token.
//! In-flight requests are not aborted; every commit re-checks the token under
//! the store's write lock, so results that land after teardown are dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::constants::POLL_INTERVAL_MS;
use crate::domain::validation::validate_readings;
use crate::error::Result;
use crate::eventing::app_event::{AppEvent, EventSender, emit};
use crate::services::gateway::SensorSource;
use crate::state::sensor_state::{SensorState, SensorStore};

/// Cooperative cancellation token shared by a loop and its in-flight cycles
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Flip to dead; irreversible
    pub fn release(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything one cycle needs, cloned into each spawned cycle
struct CycleContext<S> {
    source: Arc<S>,
    store: SensorStore,
    liveness: Liveness,
    events: Option<EventSender>,
    counter: Arc<AtomicU64>,
}

impl<S> Clone for CycleContext<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            store: self.store.clone(),
            liveness: self.liveness.clone(),
            events: self.events.clone(),
            counter: self.counter.clone(),
        }
    }
}

impl<S: SensorSource> CycleContext<S> {
    /// Apply `f` only while the loop is alive; returns whether it was applied
    fn commit(&self, f: impl FnOnce(&mut SensorState)) -> bool {
        self.store.write(|state| {
            if !self.liveness.is_alive() {
                return false;
            }
            f(state);
            true
        })
    }

    async fn run(&self) {
        let cycle = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.commit(SensorState::begin_cycle) {
            return;
        }

        if let Err(err) = self.sync(cycle).await {
            tracing::error!("Polling cycle {} failed: {}", cycle, err);
            if self.liveness.is_alive() {
                emit(
                    self.events.as_ref(),
                    AppEvent::CycleFailed {
                        cycle,
                        message: err.to_string(),
                    },
                );
            }
        }

        self.commit(SensorState::finish_cycle);
    }

    async fn sync(&self, cycle: u64) -> Result<()> {
        let raw = self.source.fetch_sensor_readings().await?;
        let health = self.source.fetch_sensor_health().await?;

        let received = raw.len();
        let readings = validate_readings(raw);
        if readings.len() < received {
            tracing::debug!(
                "Cycle {}: dropped {} of {} readings",
                cycle,
                received - readings.len(),
                received
            );
        }

        let count = readings.len();
        if !self.commit(|state| state.commit_readings(readings, health)) {
            tracing::debug!("Cycle {} resolved after teardown, discarded", cycle);
            return Ok(());
        }

        // Zero valid readings must never leave a stale risk level on screen.
        let prediction = if count > 0 {
            self.source.fetch_prediction().await?
        } else {
            None
        };
        let has_prediction = prediction.is_some();

        if self.commit(|state| state.commit_prediction(prediction)) {
            emit(
                self.events.as_ref(),
                AppEvent::SensorDataCommitted {
                    cycle,
                    readings: count,
                    has_prediction,
                },
            );
        }
        Ok(())
    }
}

/// Builder for a polling loop over a [`SensorSource`]
pub struct SensorPoller<S> {
    source: Arc<S>,
    store: SensorStore,
    interval: Duration,
    events: Option<EventSender>,
}

impl<S: SensorSource> SensorPoller<S> {
    /// Create a poller with the default 5 s cadence and a fresh store
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            store: SensorStore::new(),
            interval: Duration::from_millis(POLL_INTERVAL_MS),
            events: None,
        }
    }

    /// Override the cadence; clamped to at least 1 ms
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_events(mut self, tx: EventSender) -> Self {
        self.events = Some(tx);
        self
    }

    /// Start on the ambient tokio runtime
    ///
    /// Panics outside a runtime, like `tokio::spawn`.
    pub fn start(self) -> PollerHandle {
        self.start_on(&Handle::current())
    }

    /// Start on an explicit runtime; the first cycle begins immediately
    pub fn start_on(self, runtime: &Handle) -> PollerHandle {
        let liveness = Liveness::new();
        let ctx = CycleContext {
            source: self.source,
            store: self.store.clone(),
            liveness: liveness.clone(),
            events: self.events.clone(),
            counter: Arc::new(AtomicU64::new(0)),
        };
        let interval = self.interval;

        tracing::info!("Sensor polling started (every {} ms)", interval.as_millis());

        let timer = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if !ctx.liveness.is_alive() {
                    break;
                }
                let cycle = ctx.clone();
                tokio::spawn(async move { cycle.run().await });
            }
        });

        PollerHandle {
            store: self.store,
            liveness,
            timer,
            events: self.events,
        }
    }
}

/// Running loop, owned by the consuming view
///
/// Dropping the handle tears the loop down.
pub struct PollerHandle {
    store: SensorStore,
    liveness: Liveness,
    timer: JoinHandle<()>,
    events: Option<EventSender>,
}

impl PollerHandle {
    /// Read-only view of the committed state
    pub fn store(&self) -> &SensorStore {
        &self.store
    }

    pub fn snapshot(&self) -> SensorState {
        self.store.snapshot()
    }

    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    /// Cancel the timer and discard the results of in-flight cycles
    pub fn stop(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if !self.liveness.is_alive() {
            return;
        }
        self.timer.abort();
        self.store.write(|state| {
            self.liveness.release();
            state.mark_stopped();
        });
        emit(self.events.as_ref(), AppEvent::PollerStopped);
        tracing::info!("Sensor polling stopped");
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PollerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollerHandle")
            .field("alive", &self.is_alive())
            .field("phase", &self.store.phase())
            .finish()
    }
}
