use super::{LoadStatus, Outcome, Phase};
use crate::domain::Prediction;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionsAction {
    FetchStarted,
    FetchSucceeded(Vec<Prediction>),
    FetchFailed(String),
    /// Focus one service's forecast; `None` clears the focus
    Selected(Option<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionsState {
    pub predictions: Vec<Prediction>,
    #[serde(flatten)]
    pub status: LoadStatus,
    /// Service id of the focused forecast
    pub selected: Option<String>,
}

impl PredictionsState {
    pub fn phase(&self) -> Phase {
        self.status.phase()
    }

    pub fn get(&self, service_id: &str) -> Option<&Prediction> {
        self.predictions.iter().find(|p| p.service_id == service_id)
    }

    pub fn selected_prediction(&self) -> Option<&Prediction> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn apply(&mut self, action: PredictionsAction) -> Outcome {
        match action {
            PredictionsAction::FetchStarted => self.status.fetch_started(),
            PredictionsAction::FetchSucceeded(predictions) => {
                self.status.fetch_succeeded();
                self.predictions = predictions;
                // Keep the focus across refreshes while its service still exists
                if self.selected_prediction().is_none() {
                    self.selected = self.predictions.first().map(|p| p.service_id.clone());
                }
            }
            PredictionsAction::FetchFailed(message) => self.status.fetch_failed(message),
            PredictionsAction::Selected(None) => self.selected = None,
            PredictionsAction::Selected(Some(id)) => {
                if self.get(&id).is_none() {
                    return Outcome::StaleReference(id);
                }
                self.selected = Some(id);
            }
        }
        Outcome::Applied
    }
}
