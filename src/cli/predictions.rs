//! Predictions command implementation

use crate::cli::output::{
    format_forecast_table, format_incidents_table, format_predictions_json,
    format_predictions_table, risk_label, trend_label,
};
use crate::cli::PredictionsArgs;
use crate::operations::Dashboard;
use tokio_util::sync::CancellationToken;

/// Handle `watchtower predictions`
pub async fn handle_predictions(
    args: &PredictionsArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let predictions = dashboard.fetch_predictions(cancel).await?;

    let Some(service_id) = &args.service else {
        return if args.json {
            format_predictions_json(&predictions)
        } else {
            Ok(format_predictions_table(&predictions))
        };
    };

    if !dashboard.select_prediction(service_id) {
        anyhow::bail!("No prediction for service '{}'", service_id);
    }
    let state = dashboard.predictions();
    let Some(prediction) = state.selected_prediction() else {
        anyhow::bail!("No prediction for service '{}'", service_id);
    };

    if args.json {
        return Ok(serde_json::to_string_pretty(prediction)?);
    }

    let incidents = if prediction.predicted_incidents.is_empty() {
        "No incidents predicted".to_string()
    } else {
        format_incidents_table(&prediction.predicted_incidents)
    };
    Ok(format!(
        "{} ({})\n  Health: {:.0}%  Trend: {}  Risk: {}\n\n{}\n\n{}",
        prediction.name,
        prediction.service_id,
        prediction.current_health,
        trend_label(prediction.trend),
        risk_label(prediction.risk_level),
        format_forecast_table(&prediction.forecast),
        incidents
    ))
}
