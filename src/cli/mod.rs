//! CLI module for Watchtower
//!
//! Command-line front end over the [`Dashboard`](crate::operations::Dashboard).
//! Every invocation starts from a freshly seeded store, so mutations are
//! visible in the command's own output only.
//!
//! # Commands
//!
//! - `overview` - Service and situation counts, system health, alert feed
//! - `services` - List, add and re-status services
//! - `situations` - List, open, re-status and assign situations
//! - `settings` - List, edit and reset dashboard settings
//! - `predictions` - 24-hour health forecasts and expected incidents
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Critical services only
//! watchtower services list --status critical
//!
//! # Open a situation
//! watchtower situations create --title "Disk full" --severity high --tags "storage, urgent"
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod overview;
pub mod predictions;
pub mod services;
pub mod settings;
pub mod situations;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::domain::{Category, Environment, ServiceStatus, Severity, SituationStatus};
use crate::selectors::Filter;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Watchtower - service monitoring dashboard
#[derive(Parser, Debug)]
#[command(
    name = "watchtower",
    version,
    about = "Service monitoring dashboard: services, situations, alerts and settings"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "WATCHTOWER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the overview screen
    Overview(OverviewArgs),
    /// Manage services
    #[command(subcommand)]
    Services(ServicesCommands),
    /// Manage situations
    #[command(subcommand)]
    Situations(SituationsCommands),
    /// Manage dashboard settings
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Forecast service health over the next 24 hours
    Predictions(PredictionsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct OverviewArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ServicesCommands {
    /// List services
    List(ServicesListArgs),
    /// Register a new service
    Add(ServicesAddArgs),
    /// Change a service's status
    SetStatus(ServicesSetStatusArgs),
}

#[derive(Args, Debug)]
pub struct ServicesListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Filter by status (all, healthy, warning, critical, unknown)
    #[arg(short, long, default_value = "all")]
    pub status: Filter<ServiceStatus>,

    /// Case-insensitive search over name and description
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Args, Debug)]
pub struct ServicesAddArgs {
    /// Service name
    #[arg(short, long)]
    pub name: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "1.0.0")]
    pub version: String,

    /// Deployment environment (production, staging, development)
    #[arg(short, long, default_value = "production")]
    pub environment: Environment,

    /// Initial status
    #[arg(short, long, default_value = "unknown")]
    pub status: ServiceStatus,
}

#[derive(Args, Debug)]
pub struct ServicesSetStatusArgs {
    /// Service id
    pub id: String,

    /// New status (healthy, warning, critical, unknown)
    pub status: ServiceStatus,
}

#[derive(Subcommand, Debug)]
pub enum SituationsCommands {
    /// List situations
    List(SituationsListArgs),
    /// Open a new situation
    Create(SituationsCreateArgs),
    /// Change a situation's status
    SetStatus(SituationsSetStatusArgs),
    /// Assign a situation to someone
    Assign(SituationsAssignArgs),
}

#[derive(Args, Debug)]
pub struct SituationsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Filter by severity (all, low, medium, high, critical)
    #[arg(long, default_value = "all")]
    pub severity: Filter<Severity>,

    /// Filter by status (all, open, investigating, resolved, closed)
    #[arg(short, long, default_value = "all")]
    pub status: Filter<SituationStatus>,

    /// Case-insensitive search over title, description and tags
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Args, Debug)]
pub struct SituationsCreateArgs {
    #[arg(short, long)]
    pub title: String,

    #[arg(short, long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "medium")]
    pub severity: Severity,

    #[arg(short, long, default_value = "open")]
    pub status: SituationStatus,

    /// Comma-separated tags, e.g. "urgent, billing"
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Comma-separated ids of affected services
    #[arg(long, default_value = "")]
    pub services: String,
}

#[derive(Args, Debug)]
pub struct SituationsSetStatusArgs {
    /// Situation id
    pub id: String,

    /// New status (open, investigating, resolved, closed)
    pub status: SituationStatus,
}

#[derive(Args, Debug)]
pub struct SituationsAssignArgs {
    /// Situation id
    pub id: String,

    /// Who takes ownership
    pub assignee: String,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// List settings grouped by category
    List(SettingsListArgs),
    /// Change a setting's value
    Set(SettingsSetArgs),
    /// Restore a setting to its default
    Reset(SettingsResetArgs),
}

#[derive(Args, Debug)]
pub struct SettingsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Filter by category (all, monitoring, alerting, notifications, thresholds)
    #[arg(long, default_value = "all")]
    pub category: Filter<Category>,

    /// Case-insensitive search over name and description
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Args, Debug)]
pub struct SettingsSetArgs {
    /// Setting id
    pub id: String,

    /// New value, interpreted according to the setting's type
    pub value: String,
}

#[derive(Args, Debug)]
pub struct SettingsResetArgs {
    /// Setting id
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PredictionsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the hourly forecast and incidents for one service id
    #[arg(short, long)]
    pub service: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "watchtower.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
