//! Dashboard operations end to end: gateway call, container transitions and
//! the returned result.

mod common;

use common::*;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use watchtower::domain::{
    AlertKind, FieldValue, RiskLevel, ServiceStatus, SituationStatus, SystemStatus,
};
use watchtower::operations::OperationError;
use watchtower::selectors::{visible_services, Filter};
use watchtower::state::{Outcome, Phase, ServicesAction, SituationsAction};

// =============================================================================
// Overview
// =============================================================================

#[tokio::test]
async fn test_fetch_overview_populates_state() {
    let dashboard = seeded_dashboard();
    assert_eq!(dashboard.overview().phase(), Phase::Idle);

    let snapshot = dashboard
        .fetch_overview(&CancellationToken::new())
        .await
        .unwrap();

    let state = dashboard.overview();
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.stats.as_ref(), Some(&snapshot.stats));
    assert_eq!(state.alerts.len(), 4);
    assert_eq!(state.metrics.response_time.len(), 24);
    assert_eq!(
        state.metrics.uptime.last().map(|m| m.value),
        Some(snapshot.stats.system_uptime)
    );
}

#[tokio::test]
async fn test_dismiss_alert_twice_is_noop() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_overview(&cancel).await.unwrap();

    dashboard.dismiss_alert("2", &cancel).await.unwrap();
    assert_eq!(dashboard.overview().alerts.len(), 3);

    dashboard.dismiss_alert("2", &cancel).await.unwrap();
    let state = dashboard.overview();
    assert_eq!(state.alerts.len(), 3);
    assert!(state.status.error.is_none());
}

#[tokio::test]
async fn test_acknowledge_alert_sets_flag() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_overview(&cancel).await.unwrap();
    let before = dashboard.overview().unacknowledged();

    dashboard.acknowledge_alert("1", &cancel).await.unwrap();

    let state = dashboard.overview();
    let alert = state.alerts.iter().find(|a| a.id == "1").unwrap();
    assert!(alert.acknowledged);
    assert_eq!(state.unacknowledged(), before - 1);
}

#[tokio::test]
async fn test_check_system_health_records_result() {
    let dashboard = seeded_dashboard();
    let health = dashboard
        .check_system_health(&CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(health.status, SystemStatus::Healthy);
    assert_eq!(dashboard.overview().system_health, Some(health));
}

#[tokio::test]
async fn test_raise_alert_prepends_locally() {
    let dashboard = seeded_dashboard();
    dashboard
        .fetch_overview(&CancellationToken::new())
        .await
        .unwrap();

    let alert = dashboard.raise_alert(AlertKind::Success, "Deploy finished", "ci");

    let state = dashboard.overview();
    assert_eq!(state.alerts[0].id, alert.id);
    assert_eq!(state.alerts.len(), 5);
    assert_eq!(alert.id.len(), UUID_V4_STRING_LEN);
}

// =============================================================================
// Services
// =============================================================================

#[tokio::test]
async fn test_fetch_services_failure_keeps_items() {
    let (dashboard, gateway) = dashboard_with_gateway();
    let cancel = CancellationToken::new();
    dashboard.fetch_services(&cancel).await.unwrap();

    gateway.fail_next("Network error");
    let err = dashboard.fetch_services(&cancel).await.unwrap_err();

    assert_eq!(err, OperationError::Rejected("Network error".to_string()));
    let state = dashboard.services();
    assert_eq!(state.phase(), Phase::Failed);
    assert_eq!(state.status.error.as_deref(), Some("Network error"));
    assert_eq!(state.services.len(), 5);
    assert!(!state.status.loading);
}

#[tokio::test]
async fn test_blank_failure_uses_generic_message() {
    let (dashboard, gateway) = dashboard_with_gateway();
    gateway.fail_next("");

    let err = dashboard
        .fetch_services(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OperationError::Rejected("Failed to fetch services".to_string())
    );
    assert_eq!(
        dashboard.services().status.error.as_deref(),
        Some("Failed to fetch services")
    );
}

#[tokio::test]
async fn test_create_then_fetch_round_trip() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_services(&cancel).await.unwrap();

    let created = dashboard
        .create_service(new_service("Search", ServiceStatus::Healthy), &cancel)
        .await
        .unwrap();

    assert_eq!(created.id.len(), UUID_V4_STRING_LEN);
    assert_eq!(created.health, 95.0);
    assert!((50..550).contains(&created.response_time));
    assert!((90.0..100.0).contains(&created.uptime));

    let state = dashboard.services();
    assert_eq!(state.services.last(), Some(&created));
    assert!(!state.status.loading);

    let fetched = dashboard.fetch_service(&created.id, &cancel).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn test_fetch_service_missing_is_none() {
    let dashboard = seeded_dashboard();
    let found = dashboard
        .fetch_service("nope", &CancellationToken::new())
        .await
        .unwrap();
    assert!(found.is_none());
    assert!(dashboard.services().status.error.is_none());
}

#[tokio::test]
async fn test_update_service_status_rederives_health() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_services(&cancel).await.unwrap();

    let updated = dashboard
        .update_service_status("3", ServiceStatus::Healthy, &cancel)
        .await
        .unwrap();
    assert_eq!(updated.health, 95.0);

    let state = dashboard.services();
    let cached = state.get("3").unwrap();
    assert_eq!(cached.status, ServiceStatus::Healthy);
    assert_eq!(cached.health, 95.0);
    assert_eq!(cached.last_updated, updated.last_updated);
}

#[tokio::test]
async fn test_update_missing_service_is_rejected() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_services(&cancel).await.unwrap();

    let err = dashboard
        .update_service_status("42", ServiceStatus::Warning, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, OperationError::Rejected(ref msg) if msg.contains("42")));
    let state = dashboard.services();
    assert_eq!(state.phase(), Phase::Ready);
    assert!(state.status.error.is_some());
}

#[tokio::test]
async fn test_search_pay_matches_payment_only() {
    let dashboard = seeded_dashboard();
    dashboard
        .fetch_services(&CancellationToken::new())
        .await
        .unwrap();
    dashboard.dispatch_services(ServicesAction::SearchChanged("pay".to_string()));

    let state = dashboard.services();
    let visible = visible_services(&state);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Payment Gateway");
}

#[tokio::test]
async fn test_select_unknown_service_is_stale() {
    let dashboard = seeded_dashboard();
    let outcome = dashboard.dispatch_services(ServicesAction::Selected(Some("9".to_string())));
    assert_eq!(outcome, Outcome::StaleReference("9".to_string()));
    assert!(dashboard.services().selected.is_none());
}

#[tokio::test]
async fn test_status_filter_all_bypasses() {
    let dashboard = seeded_dashboard();
    dashboard
        .fetch_services(&CancellationToken::new())
        .await
        .unwrap();

    dashboard.dispatch_services(ServicesAction::StatusFilterChanged(Filter::Only(
        ServiceStatus::Critical,
    )));
    assert_eq!(visible_services(&dashboard.services()).len(), 1);

    dashboard.dispatch_services(ServicesAction::StatusFilterChanged(Filter::All));
    assert_eq!(visible_services(&dashboard.services()).len(), 5);
}

// =============================================================================
// Situations
// =============================================================================

#[tokio::test]
async fn test_create_situation_prepends_and_splits_tags() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_situations(&cancel).await.unwrap();

    let created = dashboard
        .create_situation(new_situation("Cache stampede", "urgent, billing"), &cancel)
        .await
        .unwrap();

    assert_eq!(created.tags, vec!["urgent", "billing"]);
    assert_eq!(created.created, created.updated);
    let state = dashboard.situations();
    assert_eq!(state.situations[0], created);
    assert_eq!(state.situations.len(), 4);
}

#[tokio::test]
async fn test_create_situation_blank_title_rejected() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_situations(&cancel).await.unwrap();

    let result = dashboard
        .create_situation(new_situation("   ", ""), &cancel)
        .await;

    assert!(matches!(result, Err(OperationError::Rejected(_))));
    let state = dashboard.situations();
    assert_eq!(state.situations.len(), 3);
    assert!(!state.status.loading);
    assert!(state.status.error.is_some());
}

#[tokio::test]
async fn test_situation_status_and_assignment() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_situations(&cancel).await.unwrap();

    dashboard
        .update_situation_status("2", SituationStatus::Resolved, &cancel)
        .await
        .unwrap();
    dashboard.assign_situation("2", "dana", &cancel).await.unwrap();

    let state = dashboard.situations();
    let situation = state.get("2").unwrap();
    assert_eq!(situation.status, SituationStatus::Resolved);
    assert_eq!(situation.assignee.as_deref(), Some("dana"));
}

#[tokio::test]
async fn test_situation_filters_merge() {
    let dashboard = seeded_dashboard();
    dashboard
        .fetch_situations(&CancellationToken::new())
        .await
        .unwrap();

    dashboard.dispatch_situations(SituationsAction::FiltersChanged(
        watchtower::selectors::SituationFilterPatch {
            severity: None,
            status: Some(Filter::Only(SituationStatus::Open)),
        },
    ));
    let state = dashboard.situations();
    assert!(state.filters.severity.is_all());
    assert_eq!(watchtower::selectors::visible_situations(&state).len(), 1);
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_update_locked_setting_leaves_value() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_configurations(&cancel).await.unwrap();
    let before = dashboard.configuration().get("7").cloned().unwrap();

    let err = dashboard
        .update_configuration("7", FieldValue::Number(10.0), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, OperationError::Rejected(ref msg) if msg.contains("not editable")));
    assert_eq!(dashboard.configuration().get("7"), Some(&before));

    // The store is untouched too
    let fresh = dashboard.fetch_configurations(&cancel).await.unwrap();
    assert_eq!(fresh.iter().find(|c| c.id == "7"), Some(&before));
}

#[tokio::test]
async fn test_update_setting_with_wrong_type_rejected() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_configurations(&cancel).await.unwrap();

    let err = dashboard
        .update_configuration("2", FieldValue::Text("maybe".to_string()), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, OperationError::Rejected(_)));
}

#[tokio::test]
async fn test_update_and_reset_setting() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    dashboard.fetch_configurations(&cancel).await.unwrap();

    dashboard
        .update_configuration("3", FieldValue::Text("aggressive".to_string()), &cancel)
        .await
        .unwrap();
    assert_eq!(
        dashboard.configuration().get("3").unwrap().value.to_string(),
        "aggressive"
    );

    dashboard.reset_configuration("3", &cancel).await.unwrap();
    assert_eq!(
        dashboard.configuration().get("3").unwrap().value.to_string(),
        "standard"
    );
}

// =============================================================================
// Predictions
// =============================================================================

#[tokio::test]
async fn test_fetch_predictions_populates_state() {
    let dashboard = seeded_dashboard();
    assert_eq!(dashboard.predictions().phase(), Phase::Idle);

    let predictions = dashboard
        .fetch_predictions(&CancellationToken::new())
        .await
        .unwrap();

    let state = dashboard.predictions();
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.predictions, predictions);
    assert_eq!(predictions.len(), 5);
    assert_eq!(state.selected.as_deref(), Some(predictions[0].service_id.as_str()));
    assert!(predictions.iter().all(|p| p.forecast.len() == 25));
}

#[tokio::test]
async fn test_predictions_reflect_created_service() {
    let dashboard = seeded_dashboard();
    let cancel = CancellationToken::new();
    let created = dashboard
        .create_service(new_service("Search", ServiceStatus::Critical), &cancel)
        .await
        .unwrap();

    let predictions = dashboard.fetch_predictions(&cancel).await.unwrap();
    let search = predictions
        .iter()
        .find(|p| p.service_id == created.id)
        .unwrap();
    assert_eq!(search.risk_level, RiskLevel::High);
    assert!(search.predicted_incidents.is_empty());

    assert!(dashboard.select_prediction(&created.id));
    assert!(!dashboard.select_prediction("missing"));
    assert_eq!(dashboard.predictions().selected.as_deref(), Some(created.id.as_str()));
}

#[tokio::test]
async fn test_fetch_predictions_failure_uses_gateway_message() {
    let (dashboard, gateway) = dashboard_with_gateway();
    gateway.fail_next("forecast model unavailable");

    let err = dashboard
        .fetch_predictions(&CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err, OperationError::Rejected("forecast model unavailable".to_string()));
    let state = dashboard.predictions();
    assert_eq!(state.phase(), Phase::Failed);
    assert_eq!(state.status.error.as_deref(), Some("forecast model unavailable"));
}

#[tokio::test]
async fn test_load_all_skips_predictions() {
    let dashboard = seeded_dashboard();
    dashboard.load_all(&CancellationToken::new()).await.unwrap();
    assert_eq!(dashboard.predictions().phase(), Phase::Idle);
}

// =============================================================================
// Cancellation and concurrency
// =============================================================================

#[tokio::test]
async fn test_cancelled_fetch_discards_result() {
    let dashboard = slow_dashboard(300);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = dashboard.fetch_services(&cancel).await.unwrap_err();

    assert_eq!(err, OperationError::Cancelled);
    let state = dashboard.services();
    assert!(!state.status.loading);
    assert!(state.services.is_empty());
    assert!(state.status.error.is_none());
    assert_eq!(state.phase(), Phase::Idle);
}

#[tokio::test]
async fn test_cancelling_one_fetch_keeps_overlapping_fetch_pending() {
    let dashboard = slow_dashboard(300);

    let background = dashboard.clone();
    let uncancelled = tokio::spawn(async move {
        background.fetch_services(&CancellationToken::new()).await
    });

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = dashboard.fetch_services(&cancel).await.unwrap_err();
    assert_eq!(err, OperationError::Cancelled);

    let state = dashboard.services();
    assert_eq!(state.phase(), Phase::Loading);
    assert_eq!(state.status.in_flight(), 1);

    let services = uncancelled.await.unwrap().unwrap();
    let state = dashboard.services();
    assert_eq!(state.phase(), Phase::Ready);
    assert_eq!(state.services, services);
}

#[tokio::test]
async fn test_pre_cancelled_mutation_does_not_dispatch() {
    let dashboard = seeded_dashboard();
    dashboard
        .fetch_services(&CancellationToken::new())
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = dashboard
        .update_service_status("1", ServiceStatus::Critical, &cancel)
        .await
        .unwrap_err();

    assert_eq!(err, OperationError::Cancelled);
    assert_eq!(
        dashboard.services().get("1").unwrap().status,
        ServiceStatus::Healthy
    );
}

#[tokio::test]
async fn test_loading_visible_while_pending() {
    let dashboard = slow_dashboard(100);
    let background = dashboard.clone();
    let handle = tokio::spawn(async move {
        background
            .fetch_situations(&CancellationToken::new())
            .await
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(dashboard.situations().phase(), Phase::Loading);

    handle.await.unwrap().unwrap();
    assert_eq!(dashboard.situations().phase(), Phase::Ready);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_on_distinct_ids() {
    let dashboard = seeded_dashboard();
    dashboard
        .fetch_services(&CancellationToken::new())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for id in ["1", "2", "3", "4", "5"] {
        let dashboard = dashboard.clone();
        handles.push(tokio::spawn(async move {
            dashboard
                .update_service_status(id, ServiceStatus::Critical, &CancellationToken::new())
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let state = dashboard.services();
    assert!(state
        .services
        .iter()
        .all(|s| s.status == ServiceStatus::Critical && s.health == 45.0));
}

#[tokio::test]
async fn test_load_all_fills_every_area() {
    let dashboard = seeded_dashboard();
    dashboard.load_all(&CancellationToken::new()).await.unwrap();

    assert_eq!(dashboard.overview().phase(), Phase::Ready);
    assert_eq!(dashboard.services().services.len(), 5);
    assert_eq!(dashboard.situations().situations.len(), 3);
    assert_eq!(dashboard.configuration().configurations.len(), 8);
}
