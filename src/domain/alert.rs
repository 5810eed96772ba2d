use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Info,
    Warning,
    Error,
    Success,
}

/// A raw alert produced by the backend.
///
/// Alerts are read-only to the dashboard apart from acknowledging (sets the
/// flag) and dismissing (removes the record).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
}
