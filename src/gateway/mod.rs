//! Remote Data Gateway.
//!
//! The only boundary between the state layer and storage. Every call sleeps
//! for its configured latency, then applies its read or mutation in one
//! critical section against the injected [`MockStore`]. Reads return clones;
//! concurrent writers overwrite each other (last write wins).

mod error;
mod seed;
mod store;


pub use error::*;
pub use store::MockStore;

use crate::config::{CallKind, GatewayConfig, HealthThresholds};
use crate::domain::{
    Alert, ConfigValue, Configuration, FieldValue, NewService, NewSituation, OverviewSnapshot,
    OverviewStats, Prediction, Service, ServiceStatus, Situation, SituationStatus, SystemHealth,
    SystemStatus, Trend,
};
use crate::selectors::{classify_risk, health_forecast, response_time_history, uptime_history};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use store::{read, write};

/// Hours covered by each service forecast.
pub const FORECAST_HOURS: u32 = 24;

/// A uniform draw in `[0, 1)` taken from the top 53 bits of a v4 UUID.
fn noise() -> f64 {
    (uuid::Uuid::new_v4().as_u128() >> 75) as f64 / (1u64 << 53) as f64
}

/// Async façade over the mock backend.
///
/// # Examples
///
/// ```
/// use watchtower::config::{GatewayConfig, HealthThresholds};
/// use watchtower::gateway::{Gateway, MockStore};
/// use std::sync::Arc;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let gateway = Gateway::new(
///         Arc::new(MockStore::seeded()),
///         GatewayConfig::instant(),
///         HealthThresholds::default(),
///     );
///     let services = gateway.list_services().await.unwrap();
///     assert_eq!(services.len(), 5);
/// });
/// ```
pub struct Gateway {
    store: Arc<MockStore>,
    config: GatewayConfig,
    thresholds: HealthThresholds,
    /// Failures to hand out to the next calls, oldest first
    faults: Mutex<VecDeque<String>>,
}

impl Gateway {
    pub fn new(store: Arc<MockStore>, config: GatewayConfig, thresholds: HealthThresholds) -> Self {
        Self {
            store,
            config,
            thresholds,
            faults: Mutex::new(VecDeque::new()),
        }
    }

    /// Gateway over a seeded store with latency disabled.
    pub fn instant() -> Self {
        Self::new(
            Arc::new(MockStore::seeded()),
            GatewayConfig::instant(),
            HealthThresholds::default(),
        )
    }

    pub fn store(&self) -> &Arc<MockStore> {
        &self.store
    }

    pub fn thresholds(&self) -> &HealthThresholds {
        &self.thresholds
    }

    /// Make the next gateway call fail with a transient error carrying
    /// `message`. Queued failures are consumed in order, one per call.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(message.into());
    }

    /// Wait out the simulated latency and consume a queued failure, if any.
    async fn settle(&self, operation: &'static str, kind: CallKind) -> Result<(), GatewayError> {
        let latency = self.config.latency(kind);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let fault = self
            .faults
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match fault {
            Some(message) => {
                tracing::debug!(operation, "Injected gateway failure");
                Err(GatewayError::Transient(message))
            }
            None => Ok(()),
        }
    }

    fn record<T>(operation: &'static str, result: Result<T, GatewayError>) -> Result<T, GatewayError> {
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::counter!("watchtower_gateway_calls_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
        if let Err(e) = &result {
            tracing::debug!(operation, error = %e, "Gateway call failed");
        }
        result
    }

    // Overview

    /// Stats computed from the current collections, plus alerts and chart
    /// series. The response-time and uptime series are regenerated around
    /// the computed averages on every call.
    pub async fn overview(&self) -> Result<OverviewSnapshot, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("overview", CallKind::Overview).await?;
            let stats = self.compute_stats();
            let now = Utc::now();
            let mut metrics = read(&self.store.metrics).clone();
            metrics.response_time = response_time_history(stats.avg_response_time, now, noise);
            metrics.uptime = uptime_history(stats.system_uptime, now, noise);
            Ok(OverviewSnapshot {
                stats,
                alerts: read(&self.store.alerts).clone(),
                metrics,
            })
        }
        .await;
        Self::record("overview", result)
    }

    fn compute_stats(&self) -> OverviewStats {
        let services = read(&self.store.services);
        let situations = read(&self.store.situations);

        let count = |status: ServiceStatus| services.iter().filter(|s| s.status == status).count() as u32;
        let mean = |values: Vec<f64>| crate::selectors::average(&values);

        OverviewStats {
            total_services: services.len() as u32,
            healthy_services: count(ServiceStatus::Healthy),
            warning_services: count(ServiceStatus::Warning),
            critical_services: count(ServiceStatus::Critical),
            open_situations: situations
                .iter()
                .filter(|s| matches!(s.status, SituationStatus::Open | SituationStatus::Investigating))
                .count() as u32,
            resolved_situations: situations
                .iter()
                .filter(|s| matches!(s.status, SituationStatus::Resolved | SituationStatus::Closed))
                .count() as u32,
            avg_response_time: mean(services.iter().map(|s| s.response_time as f64).collect()),
            system_uptime: mean(services.iter().map(|s| s.uptime).collect()),
        }
    }

    pub async fn health_check(&self) -> Result<SystemHealth, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("health_check", CallKind::HealthCheck).await?;
            Ok(SystemHealth {
                status: SystemStatus::Healthy,
                timestamp: Utc::now(),
            })
        }
        .await;
        Self::record("health_check", result)
    }

    // Predictions

    /// One forecast per service, projected from its current health with the
    /// trend its status implies.
    pub async fn predictions(&self) -> Result<Vec<Prediction>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("predictions", CallKind::Predictions).await?;
            let now = Utc::now();
            let services = read(&self.store.services);
            let incidents = read(&self.store.predicted_incidents);
            Ok(services
                .iter()
                .map(|service| {
                    let trend = Trend::from(service.status);
                    let forecast =
                        health_forecast(service.health, trend, FORECAST_HOURS, now, noise);
                    Prediction {
                        service_id: service.id.clone(),
                        name: service.name.clone(),
                        current_health: service.health,
                        trend,
                        risk_level: classify_risk(trend, service.health),
                        forecast,
                        predicted_incidents: incidents
                            .get(&service.id)
                            .cloned()
                            .unwrap_or_default(),
                    }
                })
                .collect())
        }
        .await;
        Self::record("predictions", result)
    }

    // Services

    pub async fn list_services(&self) -> Result<Vec<Service>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("list_services", CallKind::List).await?;
            Ok(read(&self.store.services).clone())
        }
        .await;
        Self::record("list_services", result)
    }

    pub async fn get_service(&self, id: &str) -> Result<Option<Service>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("get_service", CallKind::Get).await?;
            Ok(read(&self.store.services).iter().find(|s| s.id == id).cloned())
        }
        .await;
        Self::record("get_service", result)
    }

    /// Create a service. The gateway assigns the id, `lastUpdated`, the
    /// status-derived health score, and the measured response time and uptime.
    pub async fn create_service(&self, input: NewService) -> Result<Service, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("create_service", CallKind::Create).await?;
            require_non_blank("name", &input.name)?;

            let id = uuid::Uuid::new_v4();
            // The first observed metrics are not meaningful yet; draw them
            // from the id's random bits within the realistic ranges.
            let entropy = id.as_u128();
            let service = Service {
                id: id.to_string(),
                name: input.name.trim().to_string(),
                description: input.description,
                status: input.status,
                health: self.thresholds.health_for(input.status),
                response_time: 50 + (entropy % 500) as u32,
                uptime: 90.0 + ((entropy >> 64) % 1000) as f64 / 100.0,
                version: input.version,
                environment: input.environment,
                last_updated: Utc::now(),
            };

            write(&self.store.services).push(service.clone());
            tracing::info!(service_id = %service.id, name = %service.name, "Service created");
            Ok(service)
        }
        .await;
        Self::record("create_service", result)
    }

    /// Set a service's status; health is re-derived from it in the same write.
    pub async fn update_service_status(
        &self,
        id: &str,
        status: ServiceStatus,
    ) -> Result<Service, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("update_service_status", CallKind::Update).await?;
            let mut services = write(&self.store.services);
            let service = services
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| GatewayError::not_found("service", id))?;

            service.status = status;
            service.health = self.thresholds.health_for(status);
            service.last_updated = Utc::now();
            tracing::info!(service_id = %id, status = %status, health = service.health, "Service status updated");
            Ok(service.clone())
        }
        .await;
        Self::record("update_service_status", result)
    }

    // Situations

    pub async fn list_situations(&self) -> Result<Vec<Situation>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("list_situations", CallKind::SituationList).await?;
            Ok(read(&self.store.situations).clone())
        }
        .await;
        Self::record("list_situations", result)
    }

    pub async fn get_situation(&self, id: &str) -> Result<Option<Situation>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("get_situation", CallKind::Get).await?;
            Ok(read(&self.store.situations).iter().find(|s| s.id == id).cloned())
        }
        .await;
        Self::record("get_situation", result)
    }

    /// Create a situation; newest situations come first.
    pub async fn create_situation(&self, input: NewSituation) -> Result<Situation, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("create_situation", CallKind::Create).await?;
            require_non_blank("title", &input.title)?;

            let now = Utc::now();
            let situation = Situation {
                id: uuid::Uuid::new_v4().to_string(),
                title: input.title.trim().to_string(),
                description: input.description,
                severity: input.severity,
                status: input.status,
                created: now,
                updated: now,
                assignee: input
                    .assignee
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty()),
                tags: clean_list(input.tags),
                affected_services: clean_list(input.affected_services),
            };

            write(&self.store.situations).insert(0, situation.clone());
            tracing::info!(situation_id = %situation.id, severity = %situation.severity, "Situation created");
            Ok(situation)
        }
        .await;
        Self::record("create_situation", result)
    }

    pub async fn update_situation_status(
        &self,
        id: &str,
        status: SituationStatus,
    ) -> Result<Situation, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("update_situation_status", CallKind::Mutate).await?;
            self.modify_situation(id, |s| s.status = status)
        }
        .await;
        Self::record("update_situation_status", result)
    }

    pub async fn assign_situation(&self, id: &str, assignee: &str) -> Result<Situation, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("assign_situation", CallKind::Mutate).await?;
            require_non_blank("assignee", assignee)?;
            let assignee = assignee.trim().to_string();
            self.modify_situation(id, |s| s.assignee = Some(assignee))
        }
        .await;
        Self::record("assign_situation", result)
    }

    fn modify_situation(
        &self,
        id: &str,
        patch: impl FnOnce(&mut Situation),
    ) -> Result<Situation, GatewayError> {
        let mut situations = write(&self.store.situations);
        let situation = situations
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| GatewayError::not_found("situation", id))?;
        patch(situation);
        situation.updated = Utc::now();
        tracing::info!(situation_id = %id, "Situation updated");
        Ok(situation.clone())
    }

    // Alerts

    pub async fn list_alerts(&self) -> Result<Vec<Alert>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("list_alerts", CallKind::Get).await?;
            Ok(read(&self.store.alerts).clone())
        }
        .await;
        Self::record("list_alerts", result)
    }

    /// Mark an alert acknowledged. An unknown id is not an error.
    pub async fn acknowledge_alert(&self, id: &str) -> Result<(), GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("acknowledge_alert", CallKind::Get).await?;
            if let Some(alert) = write(&self.store.alerts).iter_mut().find(|a| a.id == id) {
                alert.acknowledged = true;
            }
            Ok(())
        }
        .await;
        Self::record("acknowledge_alert", result)
    }

    /// Delete an alert. An unknown id is not an error.
    pub async fn dismiss_alert(&self, id: &str) -> Result<(), GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("dismiss_alert", CallKind::Get).await?;
            let mut alerts = write(&self.store.alerts);
            if let Some(index) = alerts.iter().position(|a| a.id == id) {
                alerts.remove(index);
            }
            Ok(())
        }
        .await;
        Self::record("dismiss_alert", result)
    }

    // Configuration

    pub async fn list_configurations(&self) -> Result<Vec<Configuration>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("list_configurations", CallKind::List).await?;
            Ok(read(&self.store.configurations).clone())
        }
        .await;
        Self::record("list_configurations", result)
    }

    pub async fn get_configuration(&self, id: &str) -> Result<Option<Configuration>, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("get_configuration", CallKind::Get).await?;
            Ok(read(&self.store.configurations)
                .iter()
                .find(|c| c.id == id)
                .cloned())
        }
        .await;
        Self::record("get_configuration", result)
    }

    /// Write a setting's value. Fails with `NotEditable` on locked entries and
    /// `InvalidValue` when the input does not fit the setting's type.
    pub async fn update_configuration(
        &self,
        id: &str,
        value: FieldValue,
    ) -> Result<Configuration, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("update_configuration", CallKind::Update).await?;
            self.modify_configuration(id, |current| {
                current.with_input(&value).map_err(|reason| GatewayError::InvalidValue {
                    id: id.to_string(),
                    reason,
                })
            })
        }
        .await;
        Self::record("update_configuration", result)
    }

    /// Restore a setting to its type's default value.
    pub async fn reset_configuration(&self, id: &str) -> Result<Configuration, GatewayError> {
        let result: Result<_, GatewayError> = async {
            self.settle("reset_configuration", CallKind::Mutate).await?;
            self.modify_configuration(id, |current| Ok(current.reset()))
        }
        .await;
        Self::record("reset_configuration", result)
    }

    fn modify_configuration(
        &self,
        id: &str,
        next: impl FnOnce(&ConfigValue) -> Result<ConfigValue, GatewayError>,
    ) -> Result<Configuration, GatewayError> {
        let mut configurations = write(&self.store.configurations);
        let config = configurations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| GatewayError::not_found("configuration", id))?;
        if !config.editable {
            return Err(GatewayError::NotEditable(id.to_string()));
        }

        config.value = next(&config.value)?;
        tracing::info!(config_id = %id, value = %config.value, "Configuration updated");
        Ok(config.clone())
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::Validation {
            field: field.to_string(),
            message: "cannot be empty".to_string(),
        });
    }
    Ok(())
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
