//! AppEvent - Application Event Enum
//!
//! Everything the services tell their consumers. Sent over a crossbeam
//! channel; consumers pull from the receiving side at their own pace.

use chrono::{DateTime, Local};

use crate::domain::settings::AppSettings;
use crate::domain::user::User;
use crate::state::log_state::LogLevel;

/// Application events for service -> consumer communication
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Log message
    Log {
        level: LogLevel,
        message: String,
        timestamp: DateTime<Local>,
    },

    /// A polling cycle committed new sensor data
    SensorDataCommitted {
        cycle: u64,
        readings: usize,
        has_prediction: bool,
    },

    /// A polling cycle failed part-way; previous data is kept
    CycleFailed { cycle: u64, message: String },

    /// The polling loop was torn down
    PollerStopped,

    /// Signed-in user changed
    SessionChanged { user: Option<User> },

    /// Settings were changed and applied
    SettingsChanged { settings: AppSettings },
}

impl AppEvent {
    /// Create a log event with current timestamp
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Create an info log event
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create a warning log event
    pub fn warn(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Warn, message)
    }

    /// Create an error log event
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }
}

/// Optional event sink shared by the services
pub type EventSender = crossbeam_channel::Sender<AppEvent>;

/// Send without caring whether anyone is still listening
pub(crate) fn emit(tx: Option<&EventSender>, event: AppEvent) {
    if let Some(tx) = tx {
        let _ = tx.send(event);
    }
}
