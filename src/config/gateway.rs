//! Simulated gateway latency configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which kind of gateway call is being delayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Overview,
    HealthCheck,
    List,
    SituationList,
    Get,
    Create,
    Update,
    Mutate,
    Predictions,
}

/// Artificial latency applied by the mock gateway before each call settles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// When false every call settles immediately
    pub latency_enabled: bool,
    pub overview_ms: u64,
    pub health_ms: u64,
    /// Service and configuration lists
    pub list_ms: u64,
    pub situation_list_ms: u64,
    /// Single-record reads, alert reads and alert mutations
    pub get_ms: u64,
    pub create_ms: u64,
    /// Service status and configuration value writes
    pub update_ms: u64,
    /// Situation status, assignment and configuration reset
    pub mutate_ms: u64,
    /// Forecast generation
    pub predictions_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            latency_enabled: true,
            overview_ms: 500,
            health_ms: 100,
            list_ms: 300,
            situation_list_ms: 400,
            get_ms: 200,
            create_ms: 500,
            update_ms: 400,
            mutate_ms: 300,
            predictions_ms: 1000,
        }
    }
}

impl GatewayConfig {
    /// A configuration with every delay switched off, for tests and scripting.
    pub fn instant() -> Self {
        Self {
            latency_enabled: false,
            ..Self::default()
        }
    }

    pub fn latency(&self, kind: CallKind) -> Duration {
        if !self.latency_enabled {
            return Duration::ZERO;
        }
        let ms = match kind {
            CallKind::Overview => self.overview_ms,
            CallKind::HealthCheck => self.health_ms,
            CallKind::List => self.list_ms,
            CallKind::SituationList => self.situation_list_ms,
            CallKind::Get => self.get_ms,
            CallKind::Create => self.create_ms,
            CallKind::Update => self.update_ms,
            CallKind::Mutate => self.mutate_ms,
            CallKind::Predictions => self.predictions_ms,
        };
        Duration::from_millis(ms)
    }
}
