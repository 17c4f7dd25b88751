//! Mine - Site Information and Notifications

use serde::{Deserialize, Serialize};

/// Static description of the monitored site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MineInfo {
    pub name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elements: Vec<String>,
    /// Meters
    pub depth: f64,
    pub established: String,
    pub employees: u32,
    pub daily_production: String,
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Critical,
    Warning,
    #[serde(other)]
    Info,
}

/// A backend notification
///
/// The backend writes `level`; older payloads carry `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", alias = "level")]
    pub level: NotificationLevel,
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub read: bool,
}
