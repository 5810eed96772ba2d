use super::{LoadStatus, Outcome, Phase};
use crate::domain::{Situation, SituationStatus};
use crate::selectors::{SituationFilterPatch, SituationFilters};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum SituationsAction {
    FetchStarted,
    FetchSucceeded(Vec<Situation>),
    FetchFailed(String),
    StatusUpdated {
        id: String,
        status: SituationStatus,
        at: DateTime<Utc>,
    },
    Assigned {
        id: String,
        assignee: String,
        at: DateTime<Utc>,
    },
    CreateStarted,
    Created(Situation),
    CreateFailed(String),
    /// A status change or assignment was rejected by the gateway
    MutationFailed(String),
    Selected(Option<String>),
    FiltersChanged(SituationFilterPatch),
    SearchChanged(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SituationsState {
    pub situations: Vec<Situation>,
    #[serde(flatten)]
    pub status: LoadStatus,
    pub selected: Option<String>,
    pub filters: SituationFilters,
    pub search: String,
}

impl SituationsState {
    pub fn phase(&self) -> Phase {
        self.status.phase()
    }

    pub fn get(&self, id: &str) -> Option<&Situation> {
        self.situations.iter().find(|s| s.id == id)
    }

    pub fn selected_situation(&self) -> Option<&Situation> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    fn patch(&mut self, id: String, at: DateTime<Utc>, f: impl FnOnce(&mut Situation)) -> Outcome {
        match self.situations.iter_mut().find(|s| s.id == id) {
            Some(situation) => {
                f(situation);
                situation.updated = at;
                Outcome::Applied
            }
            None => Outcome::StaleReference(id),
        }
    }

    pub fn apply(&mut self, action: SituationsAction) -> Outcome {
        match action {
            SituationsAction::FetchStarted => self.status.fetch_started(),
            SituationsAction::FetchSucceeded(situations) => {
                self.status.fetch_succeeded();
                self.situations = situations;
            }
            SituationsAction::FetchFailed(message) => self.status.fetch_failed(message),
            SituationsAction::StatusUpdated { id, status, at } => {
                return self.patch(id, at, |s| s.status = status);
            }
            SituationsAction::Assigned { id, assignee, at } => {
                return self.patch(id, at, |s| s.assignee = Some(assignee));
            }
            SituationsAction::CreateStarted => self.status.create_started(),
            SituationsAction::Created(situation) => {
                self.status.created();
                self.situations.insert(0, situation);
            }
            SituationsAction::CreateFailed(message) => self.status.create_failed(message),
            SituationsAction::MutationFailed(message) => self.status.mutation_failed(message),
            SituationsAction::Selected(Some(id)) => {
                if self.get(&id).is_none() {
                    return Outcome::StaleReference(id);
                }
                self.selected = Some(id);
            }
            SituationsAction::Selected(None) => self.selected = None,
            SituationsAction::FiltersChanged(patch) => self.filters = self.filters.merged(patch),
            SituationsAction::SearchChanged(term) => self.search = term,
        }
        Outcome::Applied
    }
}
