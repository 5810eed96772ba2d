//! Health score thresholds

use crate::domain::ServiceStatus;
use serde::{Deserialize, Serialize};

/// Maps a service status to the health score written alongside it.
///
/// A `healthy` service never carries a score below `healthy_floor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    pub healthy_health: f64,
    pub warning_health: f64,
    /// Used for both `critical` and `unknown`
    pub critical_health: f64,
    pub healthy_floor: f64,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            healthy_health: 95.0,
            warning_health: 75.0,
            critical_health: 45.0,
            healthy_floor: 90.0,
        }
    }
}

impl HealthThresholds {
    pub fn health_for(&self, status: ServiceStatus) -> f64 {
        match status {
            ServiceStatus::Healthy => self.healthy_health,
            ServiceStatus::Warning => self.warning_health,
            ServiceStatus::Critical | ServiceStatus::Unknown => self.critical_health,
        }
    }

    /// Whether a `(status, health)` pair is allowed to exist.
    pub fn is_consistent(&self, status: ServiceStatus, health: f64) -> bool {
        status != ServiceStatus::Healthy || health >= self.healthy_floor
    }
}
