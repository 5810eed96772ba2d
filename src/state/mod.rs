//! State containers.
//!
//! One container per dashboard area. Each owns its slice of state and a fixed
//! set of transitions expressed as an action enum. `apply` is pure and total:
//! it never panics and never fails. Transitions that name an id the container
//! does not hold leave the state untouched and report
//! [`Outcome::StaleReference`].

mod configuration;
mod overview;
mod predictions;
mod services;
mod situations;

pub use configuration::*;
pub use overview::*;
pub use predictions::*;
pub use services::*;
pub use situations::*;

use serde::Serialize;

/// Coarse lifecycle of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing fetched yet
    Idle,
    Loading,
    /// Data present; field-level mutations allowed
    Ready,
    /// The most recent fetch failed
    Failed,
}

/// What a transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The action referenced an id the container does not hold; nothing changed
    StaleReference(String),
    /// The entity exists but refused the change (locked or mistyped setting)
    Refused { id: String, reason: String },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Loading flag, error string and fetch bookkeeping shared by every container.
///
/// `loading` stays set while any pending operation (fetch or create) on the
/// container is still in flight, so overlapping invocations keep the pending
/// phase visible until the last one settles or is abandoned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStatus {
    pub loading: bool,
    pub error: Option<String>,
    /// At least one fetch has succeeded
    pub loaded: bool,
    #[serde(skip)]
    fetch_failed: bool,
    #[serde(skip)]
    in_flight: u32,
}

impl LoadStatus {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.fetch_failed {
            Phase::Failed
        } else if self.loaded {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Pending operations that have not settled yet.
    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    fn begin(&mut self) {
        self.in_flight += 1;
        self.loading = true;
    }

    // Settlements without a matching begin (a replayed or foreign action)
    // must not underflow.
    fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    pub(crate) fn fetch_started(&mut self) {
        self.begin();
        self.error = None;
        self.fetch_failed = false;
    }

    pub(crate) fn fetch_succeeded(&mut self) {
        self.finish();
        self.loaded = true;
        self.fetch_failed = false;
    }

    pub(crate) fn fetch_failed(&mut self, message: String) {
        self.finish();
        self.fetch_failed = true;
        self.error = Some(message);
    }

    pub(crate) fn create_started(&mut self) {
        self.begin();
    }

    pub(crate) fn created(&mut self) {
        self.finish();
    }

    /// A create failed; the data is still valid so the phase is kept.
    pub(crate) fn create_failed(&mut self, message: String) {
        self.finish();
        self.error = Some(message);
    }

    /// A mutation without a pending phase failed. Loading is untouched since
    /// it belongs to whatever else is in flight.
    pub(crate) fn mutation_failed(&mut self, message: String) {
        self.error = Some(message);
    }

    /// An in-flight pending operation was abandoned without settling.
    pub(crate) fn abandoned(&mut self) {
        self.finish();
    }
}
