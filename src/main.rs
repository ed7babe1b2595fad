use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use feedpack::app::AppContext;
use feedpack::cli::{commands, Cli, Commands};
use feedpack::config::{Config, ConfigError, Job};
use feedpack::daemon::{self, WatchConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
    }

    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(ConfigError::NoConfigDir) => {
            tracing::warn!("No config directory available, using defaults");
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };
    config.apply_env();

    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Digest => {
            commands::run_job(&ctx, Job::Digest, cli.strict).await?;
        }
        Commands::Research => {
            commands::run_job(&ctx, Job::Research, cli.strict).await?;
        }
        Commands::Watch {
            interval,
            research,
            no_initial_run,
        } => {
            let interval_secs =
                WatchConfig::parse_interval(&interval).map_err(anyhow::Error::msg)?;
            let job = if research { Job::Research } else { Job::Digest };
            let watch_config = WatchConfig {
                interval_secs,
                run_on_start: !no_initial_run,
            };
            daemon::watch(&ctx, job, watch_config).await;
        }
        Commands::Sources { research } => {
            let job = if research { Job::Research } else { Job::Digest };
            commands::list_sources(&ctx, job)?;
        }
    }

    Ok(())
}
