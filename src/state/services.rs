use super::{LoadStatus, Outcome, Phase};
use crate::domain::{Service, ServiceStatus};
use crate::selectors::{Filter, ServiceFilters};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ServicesAction {
    FetchStarted,
    FetchSucceeded(Vec<Service>),
    FetchFailed(String),
    /// A single record re-read from the gateway
    Refreshed(Service),
    LookupFailed(String),
    StatusUpdated {
        id: String,
        status: ServiceStatus,
        health: f64,
        at: DateTime<Utc>,
    },
    StatusUpdateFailed(String),
    CreateStarted,
    Created(Service),
    CreateFailed(String),
    Selected(Option<String>),
    StatusFilterChanged(Filter<ServiceStatus>),
    SearchChanged(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServicesState {
    pub services: Vec<Service>,
    #[serde(flatten)]
    pub status: LoadStatus,
    /// Id of the selected service
    pub selected: Option<String>,
    pub filters: ServiceFilters,
}

impl ServicesState {
    pub fn phase(&self) -> Phase {
        self.status.phase()
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    pub fn apply(&mut self, action: ServicesAction) -> Outcome {
        match action {
            ServicesAction::FetchStarted => self.status.fetch_started(),
            ServicesAction::FetchSucceeded(services) => {
                self.status.fetch_succeeded();
                self.services = services;
            }
            ServicesAction::FetchFailed(message) => self.status.fetch_failed(message),
            ServicesAction::Refreshed(service) => {
                match self.services.iter_mut().find(|s| s.id == service.id) {
                    Some(existing) => *existing = service,
                    None => return Outcome::StaleReference(service.id),
                }
            }
            ServicesAction::StatusUpdated {
                id,
                status,
                health,
                at,
            } => match self.services.iter_mut().find(|s| s.id == id) {
                Some(service) => {
                    service.status = status;
                    service.health = health;
                    service.last_updated = at;
                }
                None => return Outcome::StaleReference(id),
            },
            ServicesAction::LookupFailed(message) | ServicesAction::StatusUpdateFailed(message) => {
                self.status.mutation_failed(message)
            }
            ServicesAction::CreateStarted => self.status.create_started(),
            ServicesAction::Created(service) => {
                self.status.created();
                self.services.push(service);
            }
            ServicesAction::CreateFailed(message) => self.status.create_failed(message),
            ServicesAction::Selected(Some(id)) => {
                if self.get(&id).is_none() {
                    return Outcome::StaleReference(id);
                }
                self.selected = Some(id);
            }
            ServicesAction::Selected(None) => self.selected = None,
            ServicesAction::StatusFilterChanged(filter) => self.filters.status = filter,
            ServicesAction::SearchChanged(term) => self.filters.search = term,
        }
        Outcome::Applied
    }
}
