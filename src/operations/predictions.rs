use super::{await_gateway, write, Dashboard, OperationError, Settled};
use crate::domain::Prediction;
use crate::state::PredictionsAction;
use tokio_util::sync::CancellationToken;

impl Dashboard {
    /// Regenerate every service forecast.
    pub async fn fetch_predictions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Prediction>, OperationError> {
        self.dispatch_predictions(PredictionsAction::FetchStarted);
        let call = self.gateway().predictions();
        match await_gateway("fetch_predictions", "Failed to fetch predictions", cancel, call).await {
            Settled::Fulfilled(predictions) => {
                self.dispatch_predictions(PredictionsAction::FetchSucceeded(predictions.clone()));
                Ok(predictions)
            }
            Settled::Rejected(reason) => {
                self.dispatch_predictions(PredictionsAction::FetchFailed(reason.clone()));
                Err(OperationError::Rejected(reason))
            }
            Settled::Cancelled => {
                write(&self.inner.predictions).status.abandoned();
                Err(OperationError::Cancelled)
            }
        }
    }

    /// Focus one service's forecast. Returns false when no forecast for
    /// `service_id` has been loaded.
    pub fn select_prediction(&self, service_id: &str) -> bool {
        self.dispatch_predictions(PredictionsAction::Selected(Some(service_id.to_string())))
            .is_applied()
    }
}
