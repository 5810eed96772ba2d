use super::ServiceStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction a service's health is expected to move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Stable,
    Declining,
    Critical,
    Fluctuating,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Stable => "stable",
            Trend::Declining => "declining",
            Trend::Critical => "critical",
            Trend::Fluctuating => "fluctuating",
        }
    }
}

/// A service's current status implies its trend: nothing else is observed.
impl From<ServiceStatus> for Trend {
    fn from(status: ServiceStatus) -> Self {
        match status {
            ServiceStatus::Healthy => Trend::Stable,
            ServiceStatus::Warning => Trend::Declining,
            ServiceStatus::Critical => Trend::Critical,
            ServiceStatus::Unknown => Trend::Fluctuating,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stable" => Ok(Trend::Stable),
            "declining" => Ok(Trend::Declining),
            "critical" => Ok(Trend::Critical),
            "fluctuating" => Ok(Trend::Fluctuating),
            _ => Err(format!("Invalid trend: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

/// One hour of a health forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time: DateTime<Utc>,
    /// 0-100, rounded to two decimals
    pub health: f64,
    /// Percentage, 70-100
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedIncident {
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
    /// Percentage
    pub probability: u8,
}

/// Forecast for one service over the next hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub service_id: String,
    pub name: String,
    pub current_health: f64,
    pub trend: Trend,
    pub risk_level: RiskLevel,
    pub forecast: Vec<ForecastPoint>,
    pub predicted_incidents: Vec<PredictedIncident>,
}

impl Prediction {
    /// Health at the end of the forecast window.
    pub fn final_health(&self) -> Option<f64> {
        self.forecast.last().map(|p| p.health)
    }

    pub fn lowest_health(&self) -> Option<f64> {
        self.forecast.iter().map(|p| p.health).reduce(f64::min)
    }
}
