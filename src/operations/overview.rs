use super::{await_gateway, write, Dashboard, OperationError, Settled};
use crate::domain::{Alert, AlertKind, OverviewSnapshot, SystemHealth};
use crate::state::OverviewAction;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

impl Dashboard {
    pub async fn fetch_overview(
        &self,
        cancel: &CancellationToken,
    ) -> Result<OverviewSnapshot, OperationError> {
        self.dispatch_overview(OverviewAction::FetchStarted);
        let call = self.gateway().overview();
        match await_gateway("fetch_overview", "Failed to fetch overview", cancel, call).await {
            Settled::Fulfilled(snapshot) => {
                self.dispatch_overview(OverviewAction::FetchSucceeded(snapshot.clone()));
                Ok(snapshot)
            }
            Settled::Rejected(reason) => {
                self.dispatch_overview(OverviewAction::FetchFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => {
                write(&self.inner.overview).status.abandoned();
                Err(OperationError::Cancelled)
            }
        }
    }

    /// Acknowledge an alert. Acknowledging an id the gateway does not hold
    /// succeeds and changes nothing.
    pub async fn acknowledge_alert(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<(), OperationError> {
        let call = self.gateway().acknowledge_alert(id);
        match await_gateway("acknowledge_alert", "Failed to acknowledge alert", cancel, call).await
        {
            Settled::Fulfilled(()) => {
                self.dispatch_overview(OverviewAction::AlertAcknowledged(id.to_string()));
                Ok(())
            }
            Settled::Rejected(reason) => {
                self.dispatch_overview(OverviewAction::MutationFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }

    /// Dismiss an alert. Dismissing twice is a no-op.
    pub async fn dismiss_alert(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<(), OperationError> {
        let call = self.gateway().dismiss_alert(id);
        match await_gateway("dismiss_alert", "Failed to dismiss alert", cancel, call).await {
            Settled::Fulfilled(()) => {
                self.dispatch_overview(OverviewAction::AlertDismissed(id.to_string()));
                Ok(())
            }
            Settled::Rejected(reason) => {
                self.dispatch_overview(OverviewAction::MutationFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }

    pub async fn check_system_health(
        &self,
        cancel: &CancellationToken,
    ) -> Result<SystemHealth, OperationError> {
        let call = self.gateway().health_check();
        match await_gateway(
            "check_system_health",
            "Failed to check system health",
            cancel,
            call,
        )
        .await
        {
            Settled::Fulfilled(health) => {
                self.dispatch_overview(OverviewAction::HealthChecked(health.clone()));
                Ok(health)
            }
            Settled::Rejected(reason) => {
                self.dispatch_overview(OverviewAction::MutationFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }

    /// Push a locally raised alert onto the feed. Never touches the gateway.
    pub fn raise_alert(&self, kind: AlertKind, message: impl Into<String>, source: &str) -> Alert {
        let alert = Alert {
            id: uuid::Uuid::new_v4().to_string(),
            message: message.into(),
            kind,
            source: source.to_string(),
            timestamp: Utc::now(),
            acknowledged: false,
        };
        self.dispatch_overview(OverviewAction::AlertAdded(alert.clone()));
        alert
    }
}
