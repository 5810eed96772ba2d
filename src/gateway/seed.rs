//! Demo dataset loaded by [`MockStore::seeded`](super::MockStore::seeded).

use crate::domain::{
    Alert, AlertKind, Category, ConfigValue, Configuration, Environment, MetricData,
    OverviewMetrics, PredictedIncident, Service, ServiceStatus, Situation, SituationStatus,
    Severity,
};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

fn hours_ago(hours: i64) -> DateTime<Utc> {
    Utc::now() - Duration::hours(hours)
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    name: &str,
    description: &str,
    status: ServiceStatus,
    health: f64,
    response_time: u32,
    uptime: f64,
    version: &str,
    environment: Environment,
) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status,
        health,
        response_time,
        uptime,
        version: version.to_string(),
        environment,
        last_updated: hours_ago(1),
    }
}

pub(crate) fn services() -> Vec<Service> {
    vec![
        service(
            "1",
            "Authentication Service",
            "Handles user login, tokens and session management",
            ServiceStatus::Healthy,
            95.0,
            120,
            99.9,
            "2.4.1",
            Environment::Production,
        ),
        service(
            "2",
            "Payment Gateway",
            "Processes card payments and refunds",
            ServiceStatus::Warning,
            78.0,
            340,
            98.7,
            "1.9.0",
            Environment::Production,
        ),
        service(
            "3",
            "Database Service",
            "Primary relational storage cluster",
            ServiceStatus::Critical,
            45.0,
            890,
            95.2,
            "14.2",
            Environment::Production,
        ),
        service(
            "4",
            "API Gateway",
            "Routes and rate-limits public API traffic",
            ServiceStatus::Healthy,
            92.0,
            85,
            99.95,
            "3.1.0",
            Environment::Production,
        ),
        service(
            "5",
            "Email Service",
            "Transactional email delivery",
            ServiceStatus::Warning,
            62.0,
            450,
            97.8,
            "1.2.3",
            Environment::Staging,
        ),
    ]
}

pub(crate) fn situations() -> Vec<Situation> {
    vec![
        Situation {
            id: "1".to_string(),
            title: "Database connection pool exhaustion".to_string(),
            description: "Primary database is rejecting new connections under peak load"
                .to_string(),
            severity: Severity::Critical,
            status: SituationStatus::Investigating,
            created: hours_ago(6),
            updated: hours_ago(2),
            assignee: Some("oncall-db".to_string()),
            tags: vec!["database".to_string(), "performance".to_string()],
            affected_services: vec!["3".to_string(), "2".to_string()],
        },
        Situation {
            id: "2".to_string(),
            title: "Elevated payment latency".to_string(),
            description: "Checkout requests are taking over 300ms at p95".to_string(),
            severity: Severity::High,
            status: SituationStatus::Open,
            created: hours_ago(4),
            updated: hours_ago(4),
            assignee: None,
            tags: vec!["payments".to_string(), "latency".to_string()],
            affected_services: vec!["2".to_string()],
        },
        Situation {
            id: "3".to_string(),
            title: "Email queue backlog".to_string(),
            description: "Outbound email queue grew past its alerting threshold".to_string(),
            severity: Severity::Medium,
            status: SituationStatus::Resolved,
            created: hours_ago(30),
            updated: hours_ago(20),
            assignee: Some("platform".to_string()),
            tags: vec!["email".to_string()],
            affected_services: vec!["5".to_string()],
        },
    ]
}

pub(crate) fn alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "1".to_string(),
            message: "Database CPU above 90% for 10 minutes".to_string(),
            kind: AlertKind::Error,
            source: "Database Service".to_string(),
            timestamp: hours_ago(1),
            acknowledged: false,
        },
        Alert {
            id: "2".to_string(),
            message: "Payment Gateway response time degraded".to_string(),
            kind: AlertKind::Warning,
            source: "Payment Gateway".to_string(),
            timestamp: hours_ago(2),
            acknowledged: false,
        },
        Alert {
            id: "3".to_string(),
            message: "Authentication Service deployed 2.4.1".to_string(),
            kind: AlertKind::Success,
            source: "Deployments".to_string(),
            timestamp: hours_ago(5),
            acknowledged: true,
        },
        Alert {
            id: "4".to_string(),
            message: "Scheduled maintenance window tonight".to_string(),
            kind: AlertKind::Info,
            source: "Operations".to_string(),
            timestamp: hours_ago(8),
            acknowledged: false,
        },
    ]
}

fn setting(
    id: &str,
    category: Category,
    name: &str,
    description: &str,
    value: ConfigValue,
    editable: bool,
) -> Configuration {
    Configuration {
        id: id.to_string(),
        category,
        name: name.to_string(),
        description: description.to_string(),
        value,
        editable,
    }
}

pub(crate) fn configurations() -> Vec<Configuration> {
    vec![
        setting(
            "1",
            Category::Monitoring,
            "Check Interval",
            "Seconds between service health checks",
            ConfigValue::Number { value: 30.0 },
            true,
        ),
        setting(
            "2",
            Category::Monitoring,
            "Enable Tracing",
            "Collect distributed traces for sampled requests",
            ConfigValue::Boolean { value: true },
            true,
        ),
        setting(
            "3",
            Category::Alerting,
            "Escalation Policy",
            "Policy applied when an alert is not acknowledged",
            ConfigValue::Select {
                value: "standard".to_string(),
                options: vec![
                    "standard".to_string(),
                    "aggressive".to_string(),
                    "relaxed".to_string(),
                ],
            },
            true,
        ),
        setting(
            "4",
            Category::Notifications,
            "Notification Email",
            "Address that receives alert digests",
            ConfigValue::String {
                value: "ops@example.com".to_string(),
            },
            true,
        ),
        setting(
            "5",
            Category::Notifications,
            "Slack Notifications",
            "Post critical alerts to the incident channel",
            ConfigValue::Boolean { value: false },
            true,
        ),
        setting(
            "6",
            Category::Thresholds,
            "Response Time Threshold",
            "Milliseconds before a service is marked degraded",
            ConfigValue::Number { value: 500.0 },
            true,
        ),
        setting(
            "7",
            Category::Thresholds,
            "Data Retention",
            "Days of metric history kept (managed by the platform team)",
            ConfigValue::Number { value: 90.0 },
            false,
        ),
        setting(
            "8",
            Category::Alerting,
            "Alert Cooldown",
            "Minutes before the same alert can fire again",
            ConfigValue::Number { value: 15.0 },
            true,
        ),
    ]
}

fn series(label: &str, values: &[f64]) -> Vec<MetricData> {
    let points = values.len() as i64;
    values
        .iter()
        .enumerate()
        .map(|(i, value)| MetricData {
            timestamp: hours_ago(points - 1 - i as i64),
            value: *value,
            label: label.to_string(),
        })
        .collect()
}

/// Response time and uptime are generated from the live stats on every
/// overview call, so only the remaining series are stored.
pub(crate) fn metrics() -> OverviewMetrics {
    OverviewMetrics {
        throughput: series("Throughput", &[1200.0, 1350.0, 1280.0, 1420.0, 1510.0, 1390.0]),
        error_rate: series("Error Rate", &[0.4, 0.6, 1.1, 0.9, 0.7, 0.5]),
        ..OverviewMetrics::default()
    }
}

fn incident(hours_ahead: i64, kind: &str, probability: u8) -> PredictedIncident {
    PredictedIncident {
        time: Utc::now() + Duration::hours(hours_ahead),
        kind: kind.to_string(),
        probability,
    }
}

/// Incidents the forecaster expects, keyed by service id.
pub(crate) fn predicted_incidents() -> HashMap<String, Vec<PredictedIncident>> {
    HashMap::from([
        ("1".to_string(), vec![incident(8, "High Response Time", 15)]),
        (
            "2".to_string(),
            vec![
                incident(14, "Service Degradation", 65),
                incident(18, "Connection Timeout", 35),
            ],
        ),
        (
            "3".to_string(),
            vec![
                incident(2, "Service Outage", 85),
                incident(9, "Memory Leak", 70),
            ],
        ),
        ("5".to_string(), vec![incident(11, "Queue Overflow", 45)]),
    ])
}
