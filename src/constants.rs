//! Client Constants
//!
//! Centralized constants for polling cadence, storage keys and display thresholds.

/// Fixed polling cadence, measured from cycle start
pub const POLL_INTERVAL_MS: u64 = 5000;

/// Backend used when neither config nor environment provide one
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment override for the backend base URL
pub const API_URL_ENV: &str = "TERRA_WATCH_API_URL";

/// Environment variables for optional headless login
pub const EMAIL_ENV: &str = "TERRA_WATCH_EMAIL";
pub const PASSWORD_ENV: &str = "TERRA_WATCH_PASSWORD";

/// Config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Key under which the settings object is persisted
pub const SETTINGS_STORAGE_KEY: &str = "terra_watchers_settings";

/// Number of readings shown by the trend charts
pub const CHART_WINDOW: usize = 50;

/// Bounded log capacity
pub const GLOBAL_LOG_CAPACITY: usize = 1000;

/// Battery thresholds (percent, exclusive lower bounds)
pub const BATTERY_GOOD_ABOVE: f64 = 50.0;
pub const BATTERY_LOW_ABOVE: f64 = 25.0;

/// Hours of operation on a full battery
pub const BATTERY_FULL_HOURS: f64 = 48.0;

/// Accuracy thresholds (percent, exclusive lower bounds)
pub const ACCURACY_EXCELLENT_ABOVE: f64 = 95.0;
pub const ACCURACY_ACCEPTABLE_ABOVE: f64 = 90.0;
