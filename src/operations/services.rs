use super::{await_gateway, write, Dashboard, OperationError, Settled};
use crate::domain::{NewService, Service, ServiceStatus};
use crate::state::ServicesAction;
use tokio_util::sync::CancellationToken;

impl Dashboard {
    pub async fn fetch_services(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Service>, OperationError> {
        self.dispatch_services(ServicesAction::FetchStarted);
        let call = self.gateway().list_services();
        match await_gateway("fetch_services", "Failed to fetch services", cancel, call).await {
            Settled::Fulfilled(services) => {
                self.dispatch_services(ServicesAction::FetchSucceeded(services.clone()));
                Ok(services)
            }
            Settled::Rejected(reason) => {
                self.dispatch_services(ServicesAction::FetchFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => {
                write(&self.inner.services).status.abandoned();
                Err(OperationError::Cancelled)
            }
        }
    }

    /// Re-read one service. A hit replaces the cached copy in place; a miss
    /// is not an error.
    pub async fn fetch_service(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Service>, OperationError> {
        let call = self.gateway().get_service(id);
        match await_gateway("fetch_service", "Failed to fetch service", cancel, call).await {
            Settled::Fulfilled(Some(service)) => {
                self.dispatch_services(ServicesAction::Refreshed(service.clone()));
                Ok(Some(service))
            }
            Settled::Fulfilled(None) => {
                tracing::debug!(service_id = %id, "Service lookup found nothing");
                Ok(None)
            }
            Settled::Rejected(reason) => {
                self.dispatch_services(ServicesAction::LookupFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }

    pub async fn update_service_status(
        &self,
        id: &str,
        status: ServiceStatus,
        cancel: &CancellationToken,
    ) -> Result<Service, OperationError> {
        let call = self.gateway().update_service_status(id, status);
        match await_gateway(
            "update_service_status",
            "Failed to update service status",
            cancel,
            call,
        )
        .await
        {
            Settled::Fulfilled(service) => {
                self.dispatch_services(ServicesAction::StatusUpdated {
                    id: service.id.clone(),
                    status: service.status,
                    health: service.health,
                    at: service.last_updated,
                });
                Ok(service)
            }
            Settled::Rejected(reason) => {
                self.dispatch_services(ServicesAction::StatusUpdateFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }

    pub async fn create_service(
        &self,
        input: NewService,
        cancel: &CancellationToken,
    ) -> Result<Service, OperationError> {
        self.dispatch_services(ServicesAction::CreateStarted);
        let call = self.gateway().create_service(input);
        match await_gateway("create_service", "Failed to create service", cancel, call).await {
            Settled::Fulfilled(service) => {
                self.dispatch_services(ServicesAction::Created(service.clone()));
                Ok(service)
            }
            Settled::Rejected(reason) => {
                self.dispatch_services(ServicesAction::CreateFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => {
                write(&self.inner.services).status.abandoned();
                Err(OperationError::Cancelled)
            }
        }
    }
}
