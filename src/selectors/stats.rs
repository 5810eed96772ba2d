//! Ratio and aggregate helpers for the overview charts.

use crate::domain::OverviewStats;
use serde::Serialize;

/// `part` as a percentage of `total`; 0 when `total` is 0.
pub fn percentage(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

/// Share of situations that are resolved, as a percentage.
///
/// ```
/// use watchtower::selectors::resolution_rate;
///
/// assert_eq!(resolution_rate(0, 0), 0.0);
/// assert_eq!(resolution_rate(1, 3), 75.0);
/// ```
pub fn resolution_rate(open: u32, resolved: u32) -> f64 {
    percentage(resolved as f64, open as f64 + resolved as f64)
}

/// Arithmetic mean; 0 for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Percentages behind the service health doughnut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusBreakdown {
    pub healthy: f64,
    pub warning: f64,
    pub critical: f64,
}

pub fn service_status_breakdown(stats: &OverviewStats) -> StatusBreakdown {
    let total =
        (stats.healthy_services + stats.warning_services + stats.critical_services) as f64;
    StatusBreakdown {
        healthy: percentage(stats.healthy_services as f64, total),
        warning: percentage(stats.warning_services as f64, total),
        critical: percentage(stats.critical_services as f64, total),
    }
}
