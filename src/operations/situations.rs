use super::{await_gateway, write, Dashboard, OperationError, Settled};
use crate::domain::{NewSituation, Situation, SituationStatus};
use crate::state::SituationsAction;
use tokio_util::sync::CancellationToken;

impl Dashboard {
    pub async fn fetch_situations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Situation>, OperationError> {
        self.dispatch_situations(SituationsAction::FetchStarted);
        let call = self.gateway().list_situations();
        match await_gateway("fetch_situations", "Failed to fetch situations", cancel, call).await {
            Settled::Fulfilled(situations) => {
                self.dispatch_situations(SituationsAction::FetchSucceeded(situations.clone()));
                Ok(situations)
            }
            Settled::Rejected(reason) => {
                self.dispatch_situations(SituationsAction::FetchFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => {
                write(&self.inner.situations).status.abandoned();
                Err(OperationError::Cancelled)
            }
        }
    }

    pub async fn create_situation(
        &self,
        input: NewSituation,
        cancel: &CancellationToken,
    ) -> Result<Situation, OperationError> {
        self.dispatch_situations(SituationsAction::CreateStarted);
        let call = self.gateway().create_situation(input);
        match await_gateway("create_situation", "Failed to create situation", cancel, call).await {
            Settled::Fulfilled(situation) => {
                self.dispatch_situations(SituationsAction::Created(situation.clone()));
                Ok(situation)
            }
            Settled::Rejected(reason) => {
                self.dispatch_situations(SituationsAction::CreateFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => {
                write(&self.inner.situations).status.abandoned();
                Err(OperationError::Cancelled)
            }
        }
    }

    pub async fn update_situation_status(
        &self,
        id: &str,
        status: SituationStatus,
        cancel: &CancellationToken,
    ) -> Result<Situation, OperationError> {
        let call = self.gateway().update_situation_status(id, status);
        match await_gateway(
            "update_situation_status",
            "Failed to update situation status",
            cancel,
            call,
        )
        .await
        {
            Settled::Fulfilled(situation) => {
                self.dispatch_situations(SituationsAction::StatusUpdated {
                    id: situation.id.clone(),
                    status: situation.status,
                    at: situation.updated,
                });
                Ok(situation)
            }
            Settled::Rejected(reason) => {
                self.dispatch_situations(SituationsAction::MutationFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }

    pub async fn assign_situation(
        &self,
        id: &str,
        assignee: &str,
        cancel: &CancellationToken,
    ) -> Result<Situation, OperationError> {
        let call = self.gateway().assign_situation(id, assignee);
        match await_gateway("assign_situation", "Failed to assign situation", cancel, call).await {
            Settled::Fulfilled(situation) => {
                self.dispatch_situations(SituationsAction::Assigned {
                    id: situation.id.clone(),
                    assignee: situation.assignee.clone().unwrap_or_default(),
                    at: situation.updated,
                });
                Ok(situation)
            }
            Settled::Rejected(reason) => {
                self.dispatch_situations(SituationsAction::MutationFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }
}
