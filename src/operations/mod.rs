//! Asynchronous operations.
//!
//! Each operation dispatches its pending transition, awaits one gateway call,
//! then dispatches exactly one settlement (fulfilled or rejected) into the
//! owning container. The settlement is also returned to the caller as a
//! `Result`, so callers never have to re-read state to learn the outcome.
//!
//! Every operation takes a [`CancellationToken`]. Cancelling it while the
//! gateway call is in flight discards the call: nothing is dispatched apart
//! from clearing the loading flag, and the caller gets
//! [`OperationError::Cancelled`].

mod configuration;
mod overview;
mod predictions;
mod services;
mod situations;

use crate::config::WatchtowerConfig;
use crate::gateway::{Gateway, GatewayError, MockStore};
use crate::state::{
    ConfigurationAction, ConfigurationState, OverviewAction, OverviewState, Outcome,
    PredictionsAction, PredictionsState, ServicesAction, ServicesState, SituationsAction,
    SituationsState,
};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// How an operation ended, as seen by its caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The gateway rejected the call; the same text is in the container's `error`
    #[error("{0}")]
    Rejected(String),

    /// The caller cancelled before the gateway settled
    #[error("operation cancelled")]
    Cancelled,
}

/// Normalize a gateway failure into the string stored in a container.
///
/// Failures without a usable message collapse to `fallback`.
pub fn rejection_reason(error: &GatewayError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

pub(crate) enum Settled<T> {
    Fulfilled(T),
    Rejected(String),
    Cancelled,
}

/// Await a gateway call unless `cancel` fires first.
pub(crate) async fn await_gateway<T>(
    operation: &'static str,
    fallback: &'static str,
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, GatewayError>>,
) -> Settled<T> {
    tracing::debug!(operation, "Operation pending");
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(operation, "Operation cancelled, result discarded");
            Settled::Cancelled
        }
        result = call => match result {
            Ok(value) => {
                tracing::debug!(operation, "Operation fulfilled");
                Settled::Fulfilled(value)
            }
            Err(e) => {
                let reason = rejection_reason(&e, fallback);
                tracing::warn!(
                    operation,
                    error = %reason,
                    retryable = e.is_retryable(),
                    "Operation rejected"
                );
                Settled::Rejected(reason)
            }
        }
    }
}

struct Inner {
    gateway: Arc<Gateway>,
    overview: RwLock<OverviewState>,
    services: RwLock<ServicesState>,
    situations: RwLock<SituationsState>,
    configuration: RwLock<ConfigurationState>,
    predictions: RwLock<PredictionsState>,
}

/// The dashboard's state layer: the gateway handle plus one container per area.
///
/// Cheap to clone; clones share the same containers, so overlapping
/// operations may run from different tasks. Container locks are never held
/// across an `.await`.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

impl Dashboard {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self {
            inner: Arc::new(Inner {
                gateway,
                overview: RwLock::new(OverviewState::default()),
                services: RwLock::new(ServicesState::default()),
                situations: RwLock::new(SituationsState::default()),
                configuration: RwLock::new(ConfigurationState::default()),
                predictions: RwLock::new(PredictionsState::default()),
            }),
        }
    }

    /// Build a dashboard over `store` using the gateway and threshold settings
    /// from `config`.
    pub fn from_config(config: &WatchtowerConfig, store: Arc<MockStore>) -> Self {
        Self::new(Arc::new(Gateway::new(
            store,
            config.gateway.clone(),
            config.thresholds.clone(),
        )))
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.inner.gateway
    }

    // Snapshots for the presentation layer

    pub fn overview(&self) -> OverviewState {
        read(&self.inner.overview).clone()
    }

    pub fn services(&self) -> ServicesState {
        read(&self.inner.services).clone()
    }

    pub fn situations(&self) -> SituationsState {
        read(&self.inner.situations).clone()
    }

    pub fn configuration(&self) -> ConfigurationState {
        read(&self.inner.configuration).clone()
    }

    pub fn predictions(&self) -> PredictionsState {
        read(&self.inner.predictions).clone()
    }

    // Synchronous dispatch, used by operations and for UI-local actions
    // such as filter and selection changes

    pub fn dispatch_overview(&self, action: OverviewAction) -> Outcome {
        apply("overview", &self.inner.overview, |s| s.apply(action))
    }

    pub fn dispatch_services(&self, action: ServicesAction) -> Outcome {
        apply("services", &self.inner.services, |s| s.apply(action))
    }

    pub fn dispatch_situations(&self, action: SituationsAction) -> Outcome {
        apply("situations", &self.inner.situations, |s| s.apply(action))
    }

    pub fn dispatch_configuration(&self, action: ConfigurationAction) -> Outcome {
        apply("configuration", &self.inner.configuration, |s| s.apply(action))
    }

    pub fn dispatch_predictions(&self, action: PredictionsAction) -> Outcome {
        apply("predictions", &self.inner.predictions, |s| s.apply(action))
    }

    /// Fetch the four monitoring areas concurrently. Each area settles
    /// independently; the first rejection (if any) is returned after all four
    /// have settled. Predictions are slow and only fetched on demand.
    pub async fn load_all(&self, cancel: &CancellationToken) -> Result<(), OperationError> {
        let (overview, services, situations, configuration) = tokio::join!(
            self.fetch_overview(cancel),
            self.fetch_services(cancel),
            self.fetch_situations(cancel),
            self.fetch_configurations(cancel),
        );
        overview?;
        services?;
        situations?;
        configuration?;
        Ok(())
    }
}

fn apply<S>(area: &'static str, lock: &RwLock<S>, f: impl FnOnce(&mut S) -> Outcome) -> Outcome {
    let outcome = {
        let mut state = write(lock);
        f(&mut *state)
    };
    match &outcome {
        Outcome::Applied => {}
        Outcome::StaleReference(id) => {
            tracing::debug!(area, id = %id, "Transition referenced an unknown id, ignored");
        }
        Outcome::Refused { id, reason } => {
            tracing::debug!(area, id = %id, reason = %reason, "Transition refused");
        }
    }
    outcome
}

// Transitions are total, so a poisoned lock still guards consistent state.
fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
