//! Derived-view selectors.
//!
//! Pure functions computing filtered, grouped or aggregated projections of
//! container data for display. They never mutate their input and return the
//! same output for the same input.

mod filter;
mod forecast;
mod stats;

pub use filter::Filter;
pub use forecast::*;
pub use stats::*;

use crate::domain::{Category, Configuration, Service, ServiceStatus, Severity, Situation, SituationStatus};
use crate::state::{ConfigurationState, ServicesState, SituationsState};
use serde::{Deserialize, Serialize};

/// Filters on the services screen.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceFilters {
    pub status: Filter<ServiceStatus>,
    pub search: String,
}

/// Dropdown filters on the situations screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SituationFilters {
    pub severity: Filter<Severity>,
    pub status: Filter<SituationStatus>,
}

/// A partial update of [`SituationFilters`]; `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SituationFilterPatch {
    pub severity: Option<Filter<Severity>>,
    pub status: Option<Filter<SituationStatus>>,
}

impl SituationFilters {
    pub fn merged(self, patch: SituationFilterPatch) -> Self {
        Self {
            severity: patch.severity.unwrap_or(self.severity),
            status: patch.status.unwrap_or(self.status),
        }
    }
}

/// Case-insensitive substring match of `term` against any of `fields`.
/// An empty term matches everything.
pub fn matches_search<'a>(term: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_services<'a>(services: &'a [Service], filters: &ServiceFilters) -> Vec<&'a Service> {
    services
        .iter()
        .filter(|s| filters.status.matches(&s.status))
        .filter(|s| matches_search(&filters.search, [s.name.as_str(), s.description.as_str()]))
        .collect()
}

/// Search covers title, description and tags.
pub fn filter_situations<'a>(
    situations: &'a [Situation],
    filters: &SituationFilters,
    term: &str,
) -> Vec<&'a Situation> {
    situations
        .iter()
        .filter(|s| filters.severity.matches(&s.severity) && filters.status.matches(&s.status))
        .filter(|s| {
            matches_search(
                term,
                [s.title.as_str(), s.description.as_str()]
                    .into_iter()
                    .chain(s.tags.iter().map(String::as_str)),
            )
        })
        .collect()
}

pub fn filter_configurations<'a>(
    configurations: &'a [Configuration],
    category: Filter<Category>,
    term: &str,
) -> Vec<&'a Configuration> {
    configurations
        .iter()
        .filter(|c| category.matches(&c.category))
        .filter(|c| matches_search(term, [c.name.as_str(), c.description.as_str()]))
        .collect()
}

/// Group settings by category, keeping categories in first-seen order.
pub fn group_by_category<'a>(
    configurations: impl IntoIterator<Item = &'a Configuration>,
) -> Vec<(Category, Vec<&'a Configuration>)> {
    let mut groups: Vec<(Category, Vec<&'a Configuration>)> = Vec::new();
    for config in configurations {
        match groups.iter_mut().find(|(category, _)| *category == config.category) {
            Some((_, members)) => members.push(config),
            None => groups.push((config.category, vec![config])),
        }
    }
    groups
}

/// Services the services screen shows for the container's current filters.
pub fn visible_services(state: &ServicesState) -> Vec<&Service> {
    filter_services(&state.services, &state.filters)
}

pub fn visible_situations(state: &SituationsState) -> Vec<&Situation> {
    filter_situations(&state.situations, &state.filters, &state.search)
}

/// Settings matching the container's filters, grouped by category.
pub fn visible_configurations(state: &ConfigurationState) -> Vec<(Category, Vec<&Configuration>)> {
    group_by_category(filter_configurations(
        &state.configurations,
        state.category,
        &state.search,
    ))
}

/// Split a comma-separated form field into trimmed, non-empty entries.
///
/// ```
/// use watchtower::selectors::parse_list;
///
/// assert_eq!(parse_list("urgent, billing"), vec!["urgent", "billing"]);
/// assert!(parse_list(" , ").is_empty());
/// ```
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigValue, Environment};
    use chrono::Utc;

    fn service(name: &str, description: &str, status: ServiceStatus) -> Service {
        Service {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: description.to_string(),
            status,
            health: 90.0,
            response_time: 100,
            uptime: 99.0,
            version: "1".to_string(),
            environment: Environment::Production,
            last_updated: Utc::now(),
        }
    }

    fn situation(title: &str, severity: Severity, status: SituationStatus, tags: &[&str]) -> Situation {
        let now = Utc::now();
        Situation {
            id: title.to_string(),
            title: title.to_string(),
            description: String::new(),
            severity,
            status,
            created: now,
            updated: now,
            assignee: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            affected_services: vec![],
        }
    }

    fn config(id: &str, category: Category, name: &str) -> Configuration {
        Configuration {
            id: id.to_string(),
            category,
            name: name.to_string(),
            description: String::new(),
            value: ConfigValue::Boolean { value: true },
            editable: true,
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let situations = vec![
            situation("Payment Gateway", Severity::High, SituationStatus::Open, &[]),
            situation("Auth Service", Severity::Low, SituationStatus::Open, &[]),
        ];

        let found = filter_situations(&situations, &SituationFilters::default(), "pay");
        let titles: Vec<_> = found.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Payment Gateway"]);
    }

    #[test]
    fn test_situation_search_includes_tags() {
        let situations = vec![
            situation("Outage", Severity::High, SituationStatus::Open, &["Billing"]),
            situation("Latency", Severity::High, SituationStatus::Open, &["api"]),
        ];

        let found = filter_situations(&situations, &SituationFilters::default(), "billing");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Outage");
    }

    #[test]
    fn test_situation_filters_combine() {
        let situations = vec![
            situation("a", Severity::High, SituationStatus::Open, &[]),
            situation("b", Severity::High, SituationStatus::Resolved, &[]),
            situation("c", Severity::Low, SituationStatus::Open, &[]),
        ];
        let filters = SituationFilters {
            severity: Filter::Only(Severity::High),
            status: Filter::Only(SituationStatus::Open),
        };

        let found = filter_situations(&situations, &filters, "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");
    }

    #[test]
    fn test_filter_patch_merges_partially() {
        let filters = SituationFilters {
            severity: Filter::Only(Severity::Low),
            status: Filter::All,
        };
        let merged = filters.merged(SituationFilterPatch {
            status: Some(Filter::Only(SituationStatus::Closed)),
            ..Default::default()
        });

        assert_eq!(merged.severity, Filter::Only(Severity::Low));
        assert_eq!(merged.status, Filter::Only(SituationStatus::Closed));
    }

    #[test]
    fn test_filter_services_by_status_and_description() {
        let services = vec![
            service("Auth", "login and tokens", ServiceStatus::Healthy),
            service("Payments", "card processing", ServiceStatus::Warning),
            service("Billing", "invoices", ServiceStatus::Healthy),
        ];

        let filters = ServiceFilters {
            status: Filter::Only(ServiceStatus::Healthy),
            search: "TOKEN".to_string(),
        };
        let found = filter_services(&services, &filters);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Auth");

        let all = filter_services(&services, &ServiceFilters::default());
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_filter_configurations_by_category() {
        let configs = vec![
            config("1", Category::Monitoring, "Interval"),
            config("2", Category::Alerting, "Cooldown"),
        ];

        let found = filter_configurations(&configs, Filter::Only(Category::Alerting), "");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
        assert!(filter_configurations(&configs, Filter::All, "nothing").is_empty());
    }

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let configs = vec![
            config("1", Category::Thresholds, "a"),
            config("2", Category::Alerting, "b"),
            config("3", Category::Thresholds, "c"),
            config("4", Category::Monitoring, "d"),
        ];

        let groups = group_by_category(&configs);
        let order: Vec<_> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![Category::Thresholds, Category::Alerting, Category::Monitoring]
        );
        let ids: Vec<_> = groups[0].1.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_parse_list_drops_empty_entries() {
        assert_eq!(parse_list("urgent, billing"), vec!["urgent", "billing"]);
        assert_eq!(parse_list("a,,b, ,"), vec!["a", "b"]);
        assert!(parse_list("").is_empty());
    }
}
