use super::{LoadStatus, Outcome, Phase};
use crate::domain::{Alert, OverviewMetrics, OverviewSnapshot, OverviewStats, SystemHealth};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum OverviewAction {
    FetchStarted,
    FetchSucceeded(OverviewSnapshot),
    FetchFailed(String),
    AlertAcknowledged(String),
    AlertDismissed(String),
    /// A locally raised alert; newest first
    AlertAdded(Alert),
    MutationFailed(String),
    HealthChecked(SystemHealth),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewState {
    pub stats: Option<OverviewStats>,
    pub alerts: Vec<Alert>,
    pub metrics: OverviewMetrics,
    #[serde(flatten)]
    pub status: LoadStatus,
    pub system_health: Option<SystemHealth>,
}

impl OverviewState {
    pub fn phase(&self) -> Phase {
        self.status.phase()
    }

    pub fn unacknowledged(&self) -> usize {
        self.alerts.iter().filter(|a| !a.acknowledged).count()
    }

    pub fn apply(&mut self, action: OverviewAction) -> Outcome {
        match action {
            OverviewAction::FetchStarted => self.status.fetch_started(),
            OverviewAction::FetchSucceeded(snapshot) => {
                self.status.fetch_succeeded();
                self.stats = Some(snapshot.stats);
                self.alerts = snapshot.alerts;
                self.metrics = snapshot.metrics;
            }
            OverviewAction::FetchFailed(message) => self.status.fetch_failed(message),
            OverviewAction::AlertAcknowledged(id) => {
                match self.alerts.iter_mut().find(|a| a.id == id) {
                    Some(alert) => alert.acknowledged = true,
                    None => return Outcome::StaleReference(id),
                }
            }
            OverviewAction::AlertDismissed(id) => {
                let before = self.alerts.len();
                self.alerts.retain(|a| a.id != id);
                if self.alerts.len() == before {
                    return Outcome::StaleReference(id);
                }
            }
            OverviewAction::AlertAdded(alert) => self.alerts.insert(0, alert),
            OverviewAction::MutationFailed(message) => self.status.mutation_failed(message),
            OverviewAction::HealthChecked(health) => self.system_health = Some(health),
        }
        Outcome::Applied
    }
}
