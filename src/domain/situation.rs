use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        })
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

/// Lifecycle status of a situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SituationStatus {
    Open,
    Investigating,
    Resolved,
    Closed,
}

impl fmt::Display for SituationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SituationStatus::Open => "open",
            SituationStatus::Investigating => "investigating",
            SituationStatus::Resolved => "resolved",
            SituationStatus::Closed => "closed",
        })
    }
}

impl FromStr for SituationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(SituationStatus::Open),
            "investigating" => Ok(SituationStatus::Investigating),
            "resolved" => Ok(SituationStatus::Resolved),
            "closed" => Ok(SituationStatus::Closed),
            _ => Err(format!("Invalid situation status: {}", s)),
        }
    }
}

/// An incident record, distinct from a raw [`Alert`](super::Alert).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Situation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: SituationStatus,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Display order is insertion order
    pub tags: Vec<String>,
    /// Service ids; not checked against the service collection
    pub affected_services: Vec<String>,
}

/// Caller-supplied fields for a new situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSituation {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: SituationStatus,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub affected_services: Vec<String>,
}

impl NewSituation {
    /// Build from the raw form fields, where tags and affected services are
    /// comma separated.
    pub fn from_form(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
        status: SituationStatus,
        tags: &str,
        affected_services: &str,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            status,
            assignee: None,
            tags: crate::selectors::parse_list(tags),
            affected_services: crate::selectors::parse_list(affected_services),
        }
    }
}
