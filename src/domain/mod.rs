//! Domain types shared by the gateway, the state containers and the selectors.
//!
//! These are pure data contracts. Field names serialize in camelCase so the
//! JSON shape matches what the dashboard front end consumes.

mod alert;
mod configuration;
mod overview;
mod prediction;
mod service;
mod situation;

pub use alert::*;
pub use configuration::*;
pub use overview::*;
pub use prediction::*;
pub use service::*;
pub use situation::*;
