use super::Alert;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate snapshot computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_services: u32,
    pub healthy_services: u32,
    pub warning_services: u32,
    pub critical_services: u32,
    pub open_situations: u32,
    pub resolved_situations: u32,
    /// Milliseconds
    pub avg_response_time: f64,
    /// Percentage
    pub system_uptime: f64,
}

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricData {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    /// Hourly, last 24 hours
    pub response_time: Vec<MetricData>,
    /// Daily, last 7 days; the final point is the current system uptime
    #[serde(default)]
    pub uptime: Vec<MetricData>,
    pub throughput: Vec<MetricData>,
    pub error_rate: Vec<MetricData>,
}

/// Everything the overview screen loads in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewSnapshot {
    pub stats: OverviewStats,
    pub alerts: Vec<Alert>,
    pub metrics: OverviewMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Healthy,
    Degraded,
    Down,
}

/// Result of the gateway's own liveness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub status: SystemStatus,
    pub timestamp: DateTime<Utc>,
}
