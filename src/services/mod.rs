//! Service Layer
//!
//! The service layer talks to the monitoring backend over HTTP, runs the
//! polling loop, and owns the session and settings.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ApiClient                             │
//! │        (readings, health, prediction, auth, mine info)       │
//! └─────────────────────────────────────────────────────────────┘
//!        │ SensorSource            │ AuthApi
//!        ▼                         ▼
//! ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐
//! │   SensorPoller   │   │   AuthService    │   │ SettingsService  │
//! │  (5 s cycles)    │   │  (session)       │   │ (persist/apply)  │
//! └──────────────────┘   └──────────────────┘   └──────────────────┘
//!        │ commit                  │                      │
//!        ▼                         ▼ AppEvent             ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │              State Layer (SensorStore, LogState)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod gateway;
pub mod poller;
pub mod runtime;
pub mod settings;

pub use auth::AuthService;
pub use gateway::{ApiClient, AuthApi, SensorSource};
pub use poller::{Liveness, PollerHandle, SensorPoller};
pub use settings::{DocumentClasses, SettingsApplier, SettingsService};
