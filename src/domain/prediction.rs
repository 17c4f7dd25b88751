//! Prediction - Rockfall Risk Assessment

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::reading::parse_timestamp;

/// Categorical risk for one horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Normal,
    Warning,
    Critical,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Normal => "normal",
            RiskLevel::Warning => "warning",
            RiskLevel::Critical => "critical",
        }
    }
}

/// Forecast horizons the model reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    ThreeHours,
    SixHours,
    TwelveHours,
    TwentyFourHours,
}

impl Horizon {
    pub fn hours(&self) -> u32 {
        match self {
            Horizon::ThreeHours => 3,
            Horizon::SixHours => 6,
            Horizon::TwelveHours => 12,
            Horizon::TwentyFourHours => 24,
        }
    }
}

/// Latest model output
///
/// Location defaults to the origin when the backend omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Meters
    #[serde(rename = "locationX", default)]
    pub location_x: f64,
    #[serde(rename = "locationY", default)]
    pub location_y: f64,
    #[serde(rename = "locationZ", default)]
    pub location_z: f64,
    /// Rockfall probability, percent
    pub probability: f64,
    #[serde(rename = "next3Hours")]
    pub next_3_hours: RiskLevel,
    #[serde(rename = "next6Hours")]
    pub next_6_hours: RiskLevel,
    #[serde(rename = "next12Hours")]
    pub next_12_hours: RiskLevel,
    #[serde(rename = "next24Hours")]
    pub next_24_hours: RiskLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Prediction {
    /// Risk per horizon, shortest first
    pub fn horizons(&self) -> [(Horizon, RiskLevel); 4] {
        [
            (Horizon::ThreeHours, self.next_3_hours),
            (Horizon::SixHours, self.next_6_hours),
            (Horizon::TwelveHours, self.next_12_hours),
            (Horizon::TwentyFourHours, self.next_24_hours),
        ]
    }

    pub fn level_for(&self, horizon: Horizon) -> RiskLevel {
        match horizon {
            Horizon::ThreeHours => self.next_3_hours,
            Horizon::SixHours => self.next_6_hours,
            Horizon::TwelveHours => self.next_12_hours,
            Horizon::TwentyFourHours => self.next_24_hours,
        }
    }

    /// Timestamp for display; absent or unparsable falls back to `now`
    pub fn display_timestamp(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now)
    }
}
