//! In-memory backing collections for the mock gateway.

use super::seed;
use crate::domain::{Alert, Configuration, OverviewMetrics, PredictedIncident, Service, Situation};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The mock backend's storage.
///
/// Constructed explicitly and handed to a [`Gateway`](super::Gateway), so every
/// test can own an isolated instance. Each collection has its own lock; a
/// gateway method takes a collection's write lock once for its whole
/// read-modify-write, which keeps the mutation atomic on a multi-threaded
/// runtime.
#[derive(Debug, Default)]
pub struct MockStore {
    pub(crate) services: RwLock<Vec<Service>>,
    pub(crate) situations: RwLock<Vec<Situation>>,
    pub(crate) alerts: RwLock<Vec<Alert>>,
    pub(crate) configurations: RwLock<Vec<Configuration>>,
    pub(crate) metrics: RwLock<OverviewMetrics>,
    /// Keyed by service id
    pub(crate) predicted_incidents: RwLock<HashMap<String, Vec<PredictedIncident>>>,
}

impl MockStore {
    /// A store with no records at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A store populated with the demo dataset.
    pub fn seeded() -> Self {
        Self::with_records(
            seed::services(),
            seed::situations(),
            seed::alerts(),
            seed::configurations(),
            seed::metrics(),
        )
        .with_predicted_incidents(seed::predicted_incidents())
    }

    pub fn with_records(
        services: Vec<Service>,
        situations: Vec<Situation>,
        alerts: Vec<Alert>,
        configurations: Vec<Configuration>,
        metrics: OverviewMetrics,
    ) -> Self {
        Self {
            services: RwLock::new(services),
            situations: RwLock::new(situations),
            alerts: RwLock::new(alerts),
            configurations: RwLock::new(configurations),
            metrics: RwLock::new(metrics),
            predicted_incidents: RwLock::default(),
        }
    }

    pub fn with_predicted_incidents(
        mut self,
        incidents: HashMap<String, Vec<PredictedIncident>>,
    ) -> Self {
        self.predicted_incidents = RwLock::new(incidents);
        self
    }

    pub fn service_count(&self) -> usize {
        read(&self.services).len()
    }

    pub fn situation_count(&self) -> usize {
        read(&self.situations).len()
    }

    pub fn alert_count(&self) -> usize {
        read(&self.alerts).len()
    }
}

// A panic while holding a collection lock cannot leave a half-applied record:
// every mutation is a single assignment or push, so the data is still usable.
pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
