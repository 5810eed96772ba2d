use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Health status of a monitored service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Warning,
    Critical,
    Unknown,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 4] = [
        ServiceStatus::Healthy,
        ServiceStatus::Warning,
        ServiceStatus::Critical,
        ServiceStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Healthy => "healthy",
            ServiceStatus::Warning => "warning",
            ServiceStatus::Critical => "critical",
            ServiceStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "healthy" => Ok(ServiceStatus::Healthy),
            "warning" => Ok(ServiceStatus::Warning),
            "critical" => Ok(ServiceStatus::Critical),
            "unknown" => Ok(ServiceStatus::Unknown),
            _ => Err(format!("Invalid service status: {}", s)),
        }
    }
}

/// Deployment environment a service runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Staging,
    Development,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Development => "development",
        })
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" | "dev" => Ok(Environment::Development),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

/// A monitored service.
///
/// `status` and `health` are always written together; see
/// [`HealthThresholds`](crate::config::HealthThresholds) for the mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ServiceStatus,
    /// Health score, 0-100
    pub health: f64,
    /// Average response time in milliseconds
    pub response_time: u32,
    /// Uptime percentage
    pub uptime: f64,
    pub version: String,
    pub environment: Environment,
    pub last_updated: DateTime<Utc>,
}

/// Caller-supplied fields for a new service.
///
/// Identity, timestamps and metrics are assigned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub version: String,
    pub environment: Environment,
    pub status: ServiceStatus,
}

impl Default for NewService {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            version: String::new(),
            environment: Environment::Production,
            status: ServiceStatus::Healthy,
        }
    }
}
