//! Configuration module for Watchtower
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`WATCHTOWER_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use watchtower::config::WatchtowerConfig;
//!
//! let config = WatchtowerConfig::default();
//! assert_eq!(config.gateway.overview_ms, 500);
//!
//! let toml = r#"
//! [gateway]
//! latency_enabled = false
//! "#;
//! let config: WatchtowerConfig = toml::from_str(toml).unwrap();
//! assert!(!config.gateway.latency_enabled);
//! ```

pub mod error;
pub mod gateway;
pub mod logging;
pub mod thresholds;

pub use error::ConfigError;
pub use gateway::{CallKind, GatewayConfig};
pub use logging::{LogFormat, LoggingConfig};
pub use thresholds::HealthThresholds;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WatchtowerConfig {
    /// Simulated gateway latency
    pub gateway: GatewayConfig,
    /// Status to health score mapping
    pub thresholds: HealthThresholds,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl WatchtowerConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("WATCHTOWER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("WATCHTOWER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Ok(latency) = std::env::var("WATCHTOWER_LATENCY") {
            match latency.to_lowercase().as_str() {
                "true" => self.gateway.latency_enabled = true,
                "false" => self.gateway.latency_enabled = false,
                _ => {}
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let scores = [
            ("thresholds.critical_health", t.critical_health),
            ("thresholds.warning_health", t.warning_health),
            ("thresholds.healthy_health", t.healthy_health),
            ("thresholds.healthy_floor", t.healthy_floor),
        ];
        for (field, value) in scores {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::validation(
                    field,
                    format!("{} is outside 0-100", value),
                ));
            }
        }

        if t.critical_health > t.warning_health || t.warning_health > t.healthy_health {
            return Err(ConfigError::validation(
                "thresholds",
                "scores must satisfy critical <= warning <= healthy",
            ));
        }

        if t.healthy_health < t.healthy_floor {
            return Err(ConfigError::validation(
                "thresholds.healthy_health",
                format!(
                    "healthy score {} is below the healthy floor {}",
                    t.healthy_health, t.healthy_floor
                ),
            ));
        }

        Ok(())
    }
}
