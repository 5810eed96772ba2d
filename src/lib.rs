//! Watchtower - domain-state core for a service monitoring dashboard
//!
//! A mock remote gateway over an injected store, one state container per
//! dashboard area (overview, services, situations, configuration,
//! predictions), async
//! operations that move the containers through their load and mutation
//! phases, and pure selectors for the derived views.
//!
//! ```
//! use watchtower::gateway::Gateway;
//! use watchtower::operations::Dashboard;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let dashboard = Dashboard::new(Arc::new(Gateway::instant()));
//!     dashboard.fetch_services(&CancellationToken::new()).await.unwrap();
//!     assert_eq!(dashboard.services().services.len(), 5);
//! });
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod gateway;
pub mod logging;
pub mod operations;
pub mod selectors;
pub mod state;
