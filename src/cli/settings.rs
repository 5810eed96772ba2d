//! Settings command implementations

use crate::cli::output::{format_settings_json, format_settings_tables};
use crate::cli::{SettingsListArgs, SettingsResetArgs, SettingsSetArgs};
use crate::operations::Dashboard;
use crate::selectors::visible_configurations;
use crate::state::ConfigurationAction;
use anyhow::{anyhow, bail};
use tokio_util::sync::CancellationToken;

/// Handle `watchtower settings list`
pub async fn handle_settings_list(
    args: &SettingsListArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    dashboard.fetch_configurations(cancel).await?;
    dashboard.dispatch_configuration(ConfigurationAction::CategorySelected(args.category));
    dashboard.dispatch_configuration(ConfigurationAction::SearchChanged(args.search.clone()));

    let state = dashboard.configuration();
    let groups = visible_configurations(&state);

    if args.json {
        format_settings_json(&groups)
    } else if groups.is_empty() {
        Ok("No settings match".to_string())
    } else {
        Ok(format_settings_tables(&groups))
    }
}

/// Handle `watchtower settings set`
///
/// The raw value is interpreted by the setting's current type, so the
/// setting is looked up first.
pub async fn handle_settings_set(
    args: &SettingsSetArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    dashboard.fetch_configurations(cancel).await?;
    let kind = match dashboard.configuration().get(&args.id) {
        Some(setting) if !setting.editable => bail!("Setting '{}' is not editable", setting.name),
        Some(setting) => setting.value.kind(),
        None => bail!("Setting not found: {}", args.id),
    };
    let value = kind
        .parse_input(&args.value)
        .map_err(|e| anyhow!("Invalid value for {} setting: {}", kind, e))?;

    let setting = dashboard
        .update_configuration(&args.id, value, cancel)
        .await?;
    Ok(format!("✓ {} = {}", setting.name, setting.value))
}

/// Handle `watchtower settings reset`
pub async fn handle_settings_reset(
    args: &SettingsResetArgs,
    dashboard: &Dashboard,
    cancel: &CancellationToken,
) -> anyhow::Result<String> {
    let setting = dashboard.reset_configuration(&args.id, cancel).await?;
    Ok(format!("✓ {} reset to {}", setting.name, setting.value))
}
