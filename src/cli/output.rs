//! Output formatting helpers for CLI commands

use crate::domain::{
    Alert, AlertKind, Category, Configuration, ForecastPoint, OverviewStats, PredictedIncident,
    Prediction, RiskLevel, Service, ServiceStatus, Severity, Situation, SituationStatus,
    SystemHealth, SystemStatus, Trend,
};
use crate::selectors::{resolution_rate, service_status_breakdown};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn to_json(value: serde_json::Value) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn service_status_label(status: ServiceStatus) -> String {
    match status {
        ServiceStatus::Healthy => "healthy".green().to_string(),
        ServiceStatus::Warning => "warning".yellow().to_string(),
        ServiceStatus::Critical => "critical".red().to_string(),
        ServiceStatus::Unknown => "unknown".dimmed().to_string(),
    }
}

pub fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Low => "low".blue().to_string(),
        Severity::Medium => "medium".yellow().to_string(),
        Severity::High => "high".red().to_string(),
        Severity::Critical => "critical".red().bold().to_string(),
    }
}

pub fn situation_status_label(status: SituationStatus) -> String {
    match status {
        SituationStatus::Open => "open".red().to_string(),
        SituationStatus::Investigating => "investigating".yellow().to_string(),
        SituationStatus::Resolved => "resolved".green().to_string(),
        SituationStatus::Closed => "closed".dimmed().to_string(),
    }
}

pub fn risk_label(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::Low => "low".green().to_string(),
        RiskLevel::Medium => "medium".yellow().to_string(),
        RiskLevel::High => "high".red().bold().to_string(),
    }
}

pub fn trend_label(trend: Trend) -> String {
    match trend {
        Trend::Stable => "stable".green().to_string(),
        Trend::Declining => "declining".yellow().to_string(),
        Trend::Critical => "critical".red().to_string(),
        Trend::Fluctuating => "fluctuating".blue().to_string(),
    }
}

/// Get icon for an alert kind
pub fn alert_icon(kind: AlertKind) -> &'static str {
    match kind {
        AlertKind::Info => "i",
        AlertKind::Warning => "!",
        AlertKind::Error => "✗",
        AlertKind::Success => "✓",
    }
}

pub fn format_services_table(services: &[&Service]) -> String {
    let mut table = new_table(vec![
        "ID", "Name", "Status", "Health", "Response", "Uptime", "Version", "Env",
    ]);

    for s in services {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.name),
            Cell::new(service_status_label(s.status)),
            Cell::new(format!("{:.0}%", s.health)),
            Cell::new(format!("{}ms", s.response_time)),
            Cell::new(format!("{:.2}%", s.uptime)),
            Cell::new(&s.version),
            Cell::new(s.environment),
        ]);
    }

    table.to_string()
}

pub fn format_services_json(services: &[&Service]) -> anyhow::Result<String> {
    to_json(json!({ "services": services }))
}

pub fn format_situations_table(situations: &[&Situation]) -> String {
    let mut table = new_table(vec![
        "ID", "Title", "Severity", "Status", "Assignee", "Tags", "Updated",
    ]);

    for s in situations {
        table.add_row(vec![
            Cell::new(&s.id),
            Cell::new(&s.title),
            Cell::new(severity_label(s.severity)),
            Cell::new(situation_status_label(s.status)),
            Cell::new(s.assignee.as_deref().unwrap_or("-")),
            Cell::new(s.tags.join(", ")),
            Cell::new(s.updated.format("%Y-%m-%d %H:%M")),
        ]);
    }

    table.to_string()
}

pub fn format_situations_json(situations: &[&Situation]) -> anyhow::Result<String> {
    to_json(json!({ "situations": situations }))
}

/// One table per category, in the order given.
pub fn format_settings_tables(groups: &[(Category, Vec<&Configuration>)]) -> String {
    let mut out = Vec::with_capacity(groups.len());
    for (category, entries) in groups {
        let mut table = new_table(vec!["ID", "Name", "Type", "Value", "Editable"]);
        for c in entries {
            let value = match c.value.options() {
                Some(options) => format!("{} ({})", c.value, options.join("|")),
                None => c.value.to_string(),
            };
            table.add_row(vec![
                Cell::new(&c.id),
                Cell::new(&c.name),
                Cell::new(c.value.kind()),
                Cell::new(value),
                Cell::new(if c.editable { "yes" } else { "no" }),
            ]);
        }
        out.push(format!("{}\n{}", category.to_string().bold(), table));
    }
    out.join("\n\n")
}

#[derive(Serialize)]
struct SettingsGroup<'a> {
    category: Category,
    settings: &'a [&'a Configuration],
}

pub fn format_settings_json(groups: &[(Category, Vec<&Configuration>)]) -> anyhow::Result<String> {
    let groups: Vec<_> = groups
        .iter()
        .map(|(category, settings)| SettingsGroup {
            category: *category,
            settings,
        })
        .collect();
    to_json(json!({ "categories": groups }))
}

pub fn format_system_health(health: &SystemHealth) -> String {
    let status = match health.status {
        SystemStatus::Healthy => "healthy".green(),
        SystemStatus::Degraded => "degraded".yellow(),
        SystemStatus::Down => "down".red(),
    };
    format!("System: {} (checked {})", status, health.timestamp.format("%H:%M:%S"))
}

pub fn format_stats_table(stats: &OverviewStats) -> String {
    let breakdown = service_status_breakdown(stats);
    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec![
        Cell::new("Services"),
        Cell::new(format!(
            "{} ({} healthy {:.0}%, {} warning {:.0}%, {} critical {:.0}%)",
            stats.total_services,
            stats.healthy_services,
            breakdown.healthy,
            stats.warning_services,
            breakdown.warning,
            stats.critical_services,
            breakdown.critical,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Situations"),
        Cell::new(format!(
            "{} open, {} resolved",
            stats.open_situations, stats.resolved_situations
        )),
    ]);
    table.add_row(vec![
        Cell::new("Resolution rate"),
        Cell::new(format!(
            "{:.1}%",
            resolution_rate(stats.open_situations, stats.resolved_situations)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Avg response time"),
        Cell::new(format!("{:.0}ms", stats.avg_response_time)),
    ]);
    table.add_row(vec![
        Cell::new("System uptime"),
        Cell::new(format!("{:.2}%", stats.system_uptime)),
    ]);
    table.to_string()
}

pub fn format_alerts_table(alerts: &[Alert]) -> String {
    let mut table = new_table(vec!["", "ID", "Message", "Source", "Time", "Ack"]);
    for a in alerts {
        table.add_row(vec![
            Cell::new(alert_icon(a.kind)),
            Cell::new(&a.id),
            Cell::new(&a.message),
            Cell::new(&a.source),
            Cell::new(a.timestamp.format("%H:%M")),
            Cell::new(if a.acknowledged { "✓" } else { "" }),
        ]);
    }
    table.to_string()
}

pub fn format_predictions_table(predictions: &[Prediction]) -> String {
    let mut table = new_table(vec![
        "ID", "Service", "Health", "Trend", "Risk", "In 24h", "Lowest", "Incidents",
    ]);
    let health = |value: Option<f64>| value.map(|h| format!("{:.1}%", h)).unwrap_or_default();
    for p in predictions {
        table.add_row(vec![
            Cell::new(&p.service_id),
            Cell::new(&p.name),
            Cell::new(format!("{:.0}%", p.current_health)),
            Cell::new(trend_label(p.trend)),
            Cell::new(risk_label(p.risk_level)),
            Cell::new(health(p.final_health())),
            Cell::new(health(p.lowest_health())),
            Cell::new(p.predicted_incidents.len()),
        ]);
    }
    table.to_string()
}

pub fn format_forecast_table(forecast: &[ForecastPoint]) -> String {
    let mut table = new_table(vec!["Time", "Health", "Confidence"]);
    for point in forecast {
        table.add_row(vec![
            Cell::new(point.time.format("%m-%d %H:%M")),
            Cell::new(format!("{:.2}%", point.health)),
            Cell::new(format!("{:.0}%", point.confidence)),
        ]);
    }
    table.to_string()
}

pub fn format_incidents_table(incidents: &[PredictedIncident]) -> String {
    let mut table = new_table(vec!["Incident", "Probability", "Expected"]);
    for incident in incidents {
        let probability = format!("{}%", incident.probability);
        let probability = match incident.probability {
            70..=100 => probability.red().to_string(),
            40..=69 => probability.yellow().to_string(),
            _ => probability.green().to_string(),
        };
        table.add_row(vec![
            Cell::new(&incident.kind),
            Cell::new(probability),
            Cell::new(incident.time.format("%m-%d %H:%M")),
        ]);
    }
    table.to_string()
}

pub fn format_predictions_json(predictions: &[Prediction]) -> anyhow::Result<String> {
    to_json(json!({ "predictions": predictions }))
}
