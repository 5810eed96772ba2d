//! Situations command implementations

use crate::cli::output::{
    format_situations_json, format_situations_table, severity_label, situation_status_label,
};
use crate::cli::{
    SituationsAssignArgs, SituationsCreateArgs, SituationsListArgs, SituationsSetStatusArgs,
};
use crate::domain::NewSituation;
use crate::operations::Dashboard;
use crate::selectors::{visible_situations, SituationFilterPatch};
use crate::state::SituationsAction;
use tokio_util::sync::CancellationToken;

/// Handle `watchtower situations list`
pub async fn handle_situations_list(
    args: &SituationsListArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    dashboard.fetch_situations(cancel).await?;
    dashboard.dispatch_situations(SituationsAction::FiltersChanged(SituationFilterPatch {
        severity: Some(args.severity),
        status: Some(args.status),
    }));
    dashboard.dispatch_situations(SituationsAction::SearchChanged(args.search.clone()));

    let state = dashboard.situations();
    let situations = visible_situations(&state);

    if args.json {
        format_situations_json(&situations)
    } else {
        Ok(format_situations_table(&situations))
    }
}

/// Handle `watchtower situations create`
pub async fn handle_situations_create(
    args: &SituationsCreateArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let input = NewSituation::from_form(
        args.title.clone(),
        args.description.clone(),
        args.severity,
        args.status,
        &args.tags,
        &args.services,
    );
    let situation = dashboard.create_situation(input, cancel).await?;

    let mut msg = format!(
        "✓ Opened situation '{}' ({})\n  Severity: {}  Status: {}",
        situation.title,
        situation.id,
        severity_label(situation.severity),
        situation_status_label(situation.status)
    );
    if !situation.tags.is_empty() {
        msg.push_str(&format!("\n  Tags: {}", situation.tags.join(", ")));
    }
    if !situation.affected_services.is_empty() {
        msg.push_str(&format!(
            "\n  Affected services: {}",
            situation.affected_services.join(", ")
        ));
    }
    Ok(msg)
}

/// Handle `watchtower situations set-status`
pub async fn handle_situations_set_status(
    args: &SituationsSetStatusArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let situation = dashboard
        .update_situation_status(&args.id, args.status, cancel)
        .await?;
    Ok(format!(
        "✓ Situation '{}' is now {}",
        situation.title,
        situation_status_label(situation.status)
    ))
}

/// Handle `watchtower situations assign`
pub async fn handle_situations_assign(
    args: &SituationsAssignArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let situation = dashboard
        .assign_situation(&args.id, &args.assignee, cancel)
        .await?;
    Ok(format!(
        "✓ Situation '{}' assigned to {}",
        situation.title,
        situation.assignee.as_deref().unwrap_or("-")
    ))
}
