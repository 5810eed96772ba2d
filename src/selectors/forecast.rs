//! Generated series: the health forecast and the overview chart histories.
//!
//! Every generator takes its randomness as a `jitter` closure yielding values
//! in `[0, 1)`, so callers decide between real noise and a fixed value.

use crate::domain::{ForecastPoint, MetricData, RiskLevel, Trend};
use chrono::{DateTime, Duration, Utc};

/// Hourly health forecast for the `hours` after `start`, `hours + 1` points
/// including `start` itself.
///
/// Health is a random walk from `base` whose step depends on the trend.
/// Declining and critical steps are never positive and grow with the hour.
/// Every point is clamped to 0-100 and rounded to two decimals.
///
/// ```
/// use watchtower::domain::Trend;
/// use watchtower::selectors::health_forecast;
///
/// let forecast = health_forecast(45.0, Trend::Critical, 24, chrono::Utc::now(), || 0.5);
/// assert_eq!(forecast.len(), 25);
/// assert_eq!(forecast.last().unwrap().health, 0.0);
/// ```
pub fn health_forecast(
    base: f64,
    trend: Trend,
    hours: u32,
    start: DateTime<Utc>,
    mut jitter: impl FnMut() -> f64,
) -> Vec<ForecastPoint> {
    let mut health = base.clamp(0.0, 100.0);
    (0..=hours)
        .map(|i| {
            let hour = i as f64;
            let step = match trend {
                Trend::Stable => (jitter() - 0.5) * 5.0,
                Trend::Declining => -(jitter() * 3.0 + hour * 0.5),
                Trend::Critical => -(jitter() * 8.0 + hour * 1.2),
                Trend::Fluctuating => (jitter() - 0.5) * 10.0,
            };
            health = (health + step).clamp(0.0, 100.0);
            ForecastPoint {
                time: start + Duration::hours(i as i64),
                health: round2(health),
                confidence: 70.0 + jitter() * 30.0,
            }
        })
        .collect()
}

/// Risk label shown next to a forecast.
pub fn classify_risk(trend: Trend, current_health: f64) -> RiskLevel {
    match trend {
        Trend::Critical => RiskLevel::High,
        _ if current_health < 50.0 => RiskLevel::High,
        Trend::Declining | Trend::Fluctuating => RiskLevel::Medium,
        Trend::Stable if current_health < 80.0 => RiskLevel::Medium,
        Trend::Stable => RiskLevel::Low,
    }
}

/// Hourly response times for the 24 hours ending at `end`, scattered ±25ms
/// around `average` and never negative.
pub fn response_time_history(
    average: f64,
    end: DateTime<Utc>,
    mut jitter: impl FnMut() -> f64,
) -> Vec<MetricData> {
    (0..24i64)
        .rev()
        .map(|hours_back| MetricData {
            timestamp: end - Duration::hours(hours_back),
            value: (average + (jitter() - 0.5) * 50.0).max(0.0),
            label: "Response Time".to_string(),
        })
        .collect()
}

/// Daily uptime for the 7 days ending at `end`. Past days fall in 95-100%;
/// today is `current`.
pub fn uptime_history(
    current: f64,
    end: DateTime<Utc>,
    mut jitter: impl FnMut() -> f64,
) -> Vec<MetricData> {
    (0..7i64)
        .rev()
        .map(|days_back| MetricData {
            timestamp: end - Duration::days(days_back),
            value: if days_back == 0 {
                current
            } else {
                95.0 + jitter() * 5.0
            },
            label: "Uptime".to_string(),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
