use super::{await_gateway, write, Dashboard, OperationError, Settled};
use crate::domain::{Configuration, FieldValue};
use crate::state::ConfigurationAction;
use tokio_util::sync::CancellationToken;

impl Dashboard {
    pub async fn fetch_configurations(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Configuration>, OperationError> {
        self.dispatch_configuration(ConfigurationAction::FetchStarted);
        let call = self.gateway().list_configurations();
        match await_gateway(
            "fetch_configurations",
            "Failed to fetch configurations",
            cancel,
            call,
        )
        .await
        {
            Settled::Fulfilled(configurations) => {
                self.dispatch_configuration(ConfigurationAction::FetchSucceeded(
                    configurations.clone(),
                ));
                Ok(configurations)
            }
            Settled::Rejected(reason) => {
                self.dispatch_configuration(ConfigurationAction::FetchFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => {
                write(&self.inner.configuration).status.abandoned();
                Err(OperationError::Cancelled)
            }
        }
    }

    /// Write a setting. The container only changes once the gateway accepted
    /// the value.
    pub async fn update_configuration(
        &self,
        id: &str,
        value: FieldValue,
        cancel: &CancellationToken,
    ) -> Result<Configuration, OperationError> {
        let call = self.gateway().update_configuration(id, value.clone());
        match await_gateway(
            "update_configuration",
            "Failed to update configuration",
            cancel,
            call,
        )
        .await
        {
            Settled::Fulfilled(configuration) => {
                self.dispatch_configuration(ConfigurationAction::ValueUpdated {
                    id: configuration.id.clone(),
                    value,
                });
                Ok(configuration)
            }
            Settled::Rejected(reason) => {
                self.dispatch_configuration(ConfigurationAction::UpdateFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }

    pub async fn reset_configuration(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Configuration, OperationError> {
        let call = self.gateway().reset_configuration(id);
        match await_gateway(
            "reset_configuration",
            "Failed to reset configuration",
            cancel,
            call,
        )
        .await
        {
            Settled::Fulfilled(configuration) => {
                self.dispatch_configuration(ConfigurationAction::Reset(
                    configuration.id.clone(),
                ));
                Ok(configuration)
            }
            Settled::Rejected(reason) => {
                self.dispatch_configuration(ConfigurationAction::UpdateFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => Err(OperationError::Cancelled),
        }
    }
}
