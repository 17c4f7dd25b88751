//! LogState - Log Messages with Ring Buffer

use chrono::{DateTime, Local};
use std::collections::VecDeque;

use crate::eventing::app_event::AppEvent;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: u64,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// State for log messages using a ring buffer
#[derive(Debug)]
pub struct LogState {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl LogState {
    /// Create a new log state with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 1,
        }
    }

    /// Push a new log entry, evicting the oldest at capacity
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>, timestamp: DateTime<Local>) {
        if self.capacity == 0 {
            return;
        }
        let entry = LogEntry {
            id: self.next_id,
            level,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Push a log entry with current timestamp
    pub fn push_now(&mut self, level: LogLevel, message: impl Into<String>) {
        self.push(level, message, Local::now());
    }

    /// Record an event if it carries something worth showing
    pub fn record(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Log {
                level,
                message,
                timestamp,
            } => self.push(*level, message.clone(), *timestamp),
            AppEvent::CycleFailed { cycle, message } => {
                self.push_now(LogLevel::Error, format!("Cycle {cycle} failed: {message}"))
            }
            AppEvent::PollerStopped => self.push_now(LogLevel::Info, "Polling stopped"),
            AppEvent::SessionChanged { user: Some(user) } => self.push_now(
                LogLevel::Info,
                format!("Signed in as {}", user.display_name()),
            ),
            AppEvent::SessionChanged { user: None } => self.push_now(LogLevel::Info, "Signed out"),
            AppEvent::SettingsChanged { settings } => self.push_now(
                LogLevel::Debug,
                format!(
                    "Settings: {:?} theme, {} font ({})",
                    settings.theme,
                    settings.font_style.as_str(),
                    settings.font_size.as_str()
                ),
            ),
            AppEvent::SensorDataCommitted { .. } => {}
        }
    }

    /// Get all log entries
    pub fn entries(&self) -> &VecDeque<LogEntry> {
        &self.entries
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for LogState {
    fn default() -> Self {
        Self::new(crate::constants::GLOBAL_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut log = LogState::new(2);
        log.push_now(LogLevel::Info, "a");
        log.push_now(LogLevel::Warn, "b");
        log.push_now(LogLevel::Error, "c");

        let messages: Vec<_> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert_eq!(log.last().map(|e| e.id), Some(3));
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut log = LogState::new(0);
        log.push_now(LogLevel::Info, "a");
        assert!(log.is_empty());
    }

    #[test]
    fn records_failures_and_logs_only() {
        let mut log = LogState::default();
        log.record(&AppEvent::warn("slow backend"));
        log.record(&AppEvent::CycleFailed {
            cycle: 4,
            message: "HTTP 500".into(),
        });
        log.record(&AppEvent::SensorDataCommitted {
            cycle: 5,
            readings: 10,
            has_prediction: true,
        });

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].level, LogLevel::Warn);
        assert_eq!(log.entries()[1].message, "Cycle 4 failed: HTTP 500");
        assert_eq!(log.entries()[1].level.label(), "ERROR");
    }
}
