//! Services command implementations

use crate::cli::output::{format_services_json, format_services_table, service_status_label};
use crate::cli::{ServicesAddArgs, ServicesListArgs, ServicesSetStatusArgs};
use crate::domain::NewService;
use crate::operations::Dashboard;
use crate::selectors::visible_services;
use crate::state::ServicesAction;
use tokio_util::sync::CancellationToken;

/// Handle `watchtower services list`
pub async fn handle_services_list(
    args: &ServicesListArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    dashboard.fetch_services(cancel).await?;
    dashboard.dispatch_services(ServicesAction::StatusFilterChanged(args.status));
    dashboard.dispatch_services(ServicesAction::SearchChanged(args.search.clone()));

    let state = dashboard.services();
    let services = visible_services(&state);

    if args.json {
        format_services_json(&services)
    } else {
        Ok(format_services_table(&services))
    }
}

/// Handle `watchtower services add`
pub async fn handle_services_add(
    args: &ServicesAddArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let input = NewService {
        name: args.name.clone(),
        description: args.description.clone(),
        version: args.version.clone(),
        environment: args.environment,
        status: args.status,
    };
    let service = dashboard.create_service(input, cancel).await?;

    Ok(format!(
        "✓ Added service '{}' ({})\n  Status: {}  Health: {:.0}%  Response: {}ms",
        service.name,
        service.id,
        service_status_label(service.status),
        service.health,
        service.response_time
    ))
}

/// Handle `watchtower services set-status`
pub async fn handle_services_set_status(
    args: &ServicesSetStatusArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let service = dashboard
        .update_service_status(&args.id, args.status, cancel)
        .await?;

    Ok(format!(
        "✓ Service '{}' is now {} (health {:.0}%)",
        service.name,
        service_status_label(service.status),
        service.health
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Environment, ServiceStatus};
    use crate::gateway::Gateway;
    use crate::selectors::Filter;
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(Gateway::instant()))
    }

    #[tokio::test]
    async fn test_services_list_search() {
        let args = ServicesListArgs {
            json: true,
            status: Filter::All,
            search: "pay".to_string(),
        };
        let output = handle_services_list(&args, &dashboard(), &CancellationToken::new())
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let services = parsed["services"].as_array().unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0]["name"], "Payment Gateway");
    }

    #[tokio::test]
    async fn test_services_list_status_filter() {
        let args = ServicesListArgs {
            json: true,
            status: Filter::Only(ServiceStatus::Warning),
            search: String::new(),
        };
        let output = handle_services_list(&args, &dashboard(), &CancellationToken::new())
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["services"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_services_add_blank_name_fails() {
        let args = ServicesAddArgs {
            name: "  ".to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
            environment: Environment::Staging,
            status: ServiceStatus::Healthy,
        };
        let dashboard = dashboard();
        let result = handle_services_add(&args, &dashboard, &CancellationToken::new()).await;
        assert!(result.is_err());
        assert!(dashboard.services().status.error.is_some());
    }

    #[tokio::test]
    async fn test_services_set_status_unknown_id() {
        let args = ServicesSetStatusArgs {
            id: "missing".to_string(),
            status: ServiceStatus::Critical,
        };
        let err = handle_services_set_status(&args, &dashboard(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
