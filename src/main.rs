use clap::Parser;
use watchtower::cli::{
    handle_completions, handle_config_init, overview, predictions, services, settings,
    situations, Cli, Commands, ConfigCommands, ServicesCommands, SettingsCommands,
    SituationsCommands,
};
use watchtower::config::WatchtowerConfig;
use watchtower::gateway::MockStore;
use watchtower::operations::Dashboard;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn load_config(cli: &Cli) -> anyhow::Result<WatchtowerConfig> {
    let config = WatchtowerConfig::load(cli.config.as_deref())?.with_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Cancel in-flight operations on CTRL+C.
fn cancel_on_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received SIGINT, cancelling");
            cancel.cancel();
        }
    });
}

async fn run(cli: Cli) -> anyhow::Result<Option<String>> {
    // Commands that need neither config nor a dashboard
    match &cli.command {
        Commands::Config(ConfigCommands::Init(args)) => return handle_config_init(args).map(Some),
        Commands::Completions(args) => {
            handle_completions(args);
            return Ok(None);
        }
        _ => {}
    }

    let config = load_config(&cli)?;
    if let Err(e) = watchtower::logging::init_tracing(&config.logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let dashboard = Dashboard::from_config(&config, Arc::new(MockStore::seeded()));
    let cancel = CancellationToken::new();
    cancel_on_interrupt(cancel.clone());

    let output = match &cli.command {
        Commands::Overview(args) => overview::handle_overview(args, &dashboard, &cancel).await?,
        Commands::Services(cmd) => match cmd {
            ServicesCommands::List(args) => {
                services::handle_services_list(args, &dashboard, &cancel).await?
            }
            ServicesCommands::Add(args) => {
                services::handle_services_add(args, &dashboard, &cancel).await?
            }
            ServicesCommands::SetStatus(args) => {
                services::handle_services_set_status(args, &dashboard, &cancel).await?
            }
        },
        Commands::Situations(cmd) => match cmd {
            SituationsCommands::List(args) => {
                situations::handle_situations_list(args, &dashboard, &cancel).await?
            }
            SituationsCommands::Create(args) => {
                situations::handle_situations_create(args, &dashboard, &cancel).await?
            }
            SituationsCommands::SetStatus(args) => {
                situations::handle_situations_set_status(args, &dashboard, &cancel).await?
            }
            SituationsCommands::Assign(args) => {
                situations::handle_situations_assign(args, &dashboard, &cancel).await?
            }
        },
        Commands::Settings(cmd) => match cmd {
            SettingsCommands::List(args) => {
                settings::handle_settings_list(args, &dashboard, &cancel).await?
            }
            SettingsCommands::Set(args) => {
                settings::handle_settings_set(args, &dashboard, &cancel).await?
            }
            SettingsCommands::Reset(args) => {
                settings::handle_settings_reset(args, &dashboard, &cancel).await?
            }
        },
        Commands::Predictions(args) => {
            predictions::handle_predictions(args, &dashboard, &cancel).await?
        }
        Commands::Config(_) | Commands::Completions(_) => return Ok(None),
    };

    Ok(Some(output))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(Some(output)) => println!("{}", output),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
