//! Shared helpers for Watchtower integration tests.

#![allow(dead_code)]

use chrono::Utc;
use std::sync::Arc;
use watchtower::config::{GatewayConfig, HealthThresholds};
use watchtower::domain::{
    Category, ConfigValue, Configuration, Environment, NewService, NewSituation, Service,
    ServiceStatus, Severity, SituationStatus,
};
use watchtower::gateway::{Gateway, MockStore};
use watchtower::operations::Dashboard;

/// UUID v4 string length: "xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx"
pub const UUID_V4_STRING_LEN: usize = 36;

/// Dashboard over a seeded store, latency disabled.
pub fn seeded_dashboard() -> Dashboard {
    Dashboard::new(Arc::new(Gateway::instant()))
}

/// Dashboard and its gateway, for tests that inject faults.
pub fn dashboard_with_gateway() -> (Dashboard, Arc<Gateway>) {
    let gateway = Arc::new(Gateway::instant());
    (Dashboard::new(gateway.clone()), gateway)
}

/// Dashboard whose every call sleeps `ms` milliseconds.
pub fn slow_dashboard(ms: u64) -> Dashboard {
    let config = GatewayConfig {
        latency_enabled: true,
        overview_ms: ms,
        health_ms: ms,
        list_ms: ms,
        situation_list_ms: ms,
        get_ms: ms,
        create_ms: ms,
        update_ms: ms,
        mutate_ms: ms,
        predictions_ms: ms,
    };
    Dashboard::new(Arc::new(Gateway::new(
        Arc::new(MockStore::seeded()),
        config,
        HealthThresholds::default(),
    )))
}

pub fn make_service(id: &str, status: ServiceStatus) -> Service {
    Service {
        id: id.to_string(),
        name: format!("service-{}", id),
        description: format!("test service {}", id),
        status,
        health: HealthThresholds::default().health_for(status),
        response_time: 100,
        uptime: 99.5,
        version: "1.0.0".to_string(),
        environment: Environment::Development,
        last_updated: Utc::now(),
    }
}

pub fn new_service(name: &str, status: ServiceStatus) -> NewService {
    NewService {
        name: name.to_string(),
        description: "created in test".to_string(),
        version: "0.1.0".to_string(),
        environment: Environment::Staging,
        status,
    }
}

pub fn new_situation(title: &str, tags: &str) -> NewSituation {
    NewSituation::from_form(
        title,
        "created in test",
        Severity::Medium,
        SituationStatus::Open,
        tags,
        "",
    )
}

pub fn number_setting(id: &str, value: f64, editable: bool) -> Configuration {
    Configuration {
        id: id.to_string(),
        category: Category::Monitoring,
        name: format!("setting-{}", id),
        description: String::new(),
        value: ConfigValue::Number { value },
        editable,
    }
}
