use super::{LoadStatus, Outcome, Phase};
use crate::domain::{Category, ConfigValue, Configuration, FieldValue};
use crate::selectors::Filter;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationAction {
    FetchStarted,
    FetchSucceeded(Vec<Configuration>),
    FetchFailed(String),
    ValueUpdated { id: String, value: FieldValue },
    Reset(String),
    UpdateFailed(String),
    SearchChanged(String),
    CategorySelected(Filter<Category>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigurationState {
    pub configurations: Vec<Configuration>,
    #[serde(flatten)]
    pub status: LoadStatus,
    pub search: String,
    pub category: Filter<Category>,
}

impl ConfigurationState {
    pub fn phase(&self) -> Phase {
        self.status.phase()
    }

    pub fn get(&self, id: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    fn edit(
        &mut self,
        id: String,
        next: impl FnOnce(&Configuration) -> Result<ConfigValue, String>,
    ) -> Outcome {
        let Some(config) = self.configurations.iter_mut().find(|c| c.id == id) else {
            return Outcome::StaleReference(id);
        };
        if !config.editable {
            return Outcome::Refused {
                id,
                reason: "not editable".to_string(),
            };
        }
        match next(&*config) {
            Ok(value) => {
                config.value = value;
                Outcome::Applied
            }
            Err(reason) => Outcome::Refused { id, reason },
        }
    }

    pub fn apply(&mut self, action: ConfigurationAction) -> Outcome {
        match action {
            ConfigurationAction::FetchStarted => self.status.fetch_started(),
            ConfigurationAction::FetchSucceeded(configurations) => {
                self.status.fetch_succeeded();
                self.configurations = configurations;
            }
            ConfigurationAction::FetchFailed(message) => self.status.fetch_failed(message),
            ConfigurationAction::ValueUpdated { id, value } => {
                return self.edit(id, |c| c.value.with_input(&value));
            }
            ConfigurationAction::Reset(id) => return self.edit(id, |c| Ok(c.value.reset())),
            ConfigurationAction::UpdateFailed(message) => self.status.mutation_failed(message),
            ConfigurationAction::SearchChanged(term) => self.search = term,
            ConfigurationAction::CategorySelected(category) => self.category = category,
        }
        Outcome::Applied
    }
}
