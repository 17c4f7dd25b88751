//! Config - Client Configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{API_URL_ENV, CHART_WINDOW, DEFAULT_API_URL, POLL_INTERVAL_MS};
use crate::error::Result;

/// Main client configuration, read from `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend endpoint
    pub api: ApiConfig,
    /// Polling cadence
    pub polling: PollingConfig,
    /// Log output
    pub logging: LoggingConfig,
    /// Headless dashboard options
    pub dashboard: DashboardConfig,
}

/// Backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Polling configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between cycle starts
    pub interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: POLL_INTERVAL_MS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Directory for daily rolling log files; stdout only when unset
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Readings kept in the trend window
    pub chart_window: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_window: CHART_WINDOW,
        }
    }
}

impl ClientConfig {
    /// Parse from TOML text; missing sections fall back to defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: ClientConfig = toml::from_str(text)?;
        config.api.base_url = normalize_base_url(&config.api.base_url);
        Ok(config)
    }

    /// Load from a file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply an override of the base URL (usually from the environment)
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = normalize_base_url(&url);
        }
        self
    }

    /// Apply `TERRA_WATCH_API_URL` when set
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url(std::env::var(API_URL_ENV).ok())
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
