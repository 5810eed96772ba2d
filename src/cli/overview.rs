//! Overview command implementation

use crate::cli::output::{format_alerts_table, format_stats_table, format_system_health};
use crate::cli::OverviewArgs;
use crate::operations::Dashboard;
use crate::selectors::resolution_rate;
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Handle overview command
pub async fn handle_overview(
    args: &OverviewArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let (snapshot, health) = tokio::join!(
        dashboard.fetch_overview(cancel),
        dashboard.check_system_health(cancel)
    );
    let snapshot = snapshot?;
    let health = health?;
    let state = dashboard.overview();

    if args.json {
        let rate = resolution_rate(
            snapshot.stats.open_situations,
            snapshot.stats.resolved_situations,
        );
        return Ok(serde_json::to_string_pretty(&json!({
            "stats": snapshot.stats,
            "resolutionRate": rate,
            "systemHealth": health,
            "alerts": state.alerts,
            "metrics": state.metrics,
        }))?);
    }

    let mut out = vec![
        format_system_health(&health),
        format_stats_table(&snapshot.stats),
    ];
    if state.alerts.is_empty() {
        out.push("No alerts".to_string());
    } else {
        out.push(format!(
            "Alerts ({} unacknowledged)\n{}",
            state.unacknowledged(),
            format_alerts_table(&state.alerts)
        ));
    }
    Ok(out.join("\n\n"))
}
