// Tradewise entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, stdout carries only the report)
// 4. Load the player catalog / league source the command needs
// 5. Run the command and print its report

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use tradewise_app::cli::{Cli, Commands};
use tradewise_app::commands::{self, PlayerQuery};
use tradewise_app::config::{self, Config, OutputFormat};
use tradewise_football::catalog::PlayerCatalog;
use tradewise_football::source::{FileLeagueSource, SleeperClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Load config
    let base_dir = match cli.config_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve working directory")?,
    };
    let config = config::load_config(&base_dir).context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(&config)?;
    info!(
        "Config loaded from {}: players={}, sleeper={} ({})",
        base_dir.display(),
        config.data.players,
        config.sleeper.base_url,
        config.sleeper.season
    );

    let format = if cli.json {
        OutputFormat::Json
    } else {
        config.output.format
    };
    let started = Instant::now();

    // 4-5. Run the command
    let output = match cli.command {
        Commands::Trade { sides } => {
            let catalog = load_catalog(&config)?;
            commands::trade(&catalog, &sides, format)?
        }
        Commands::League {
            league_id,
            offline,
            save,
        } => {
            // Leagues can still be profiled by position without values.
            let catalog = match PlayerCatalog::load_csv(&config.players_path()) {
                Ok(catalog) => Some(catalog),
                Err(e) => {
                    warn!("Analyzing league without player values: {}", e);
                    None
                }
            };
            let store = FileLeagueSource::new(config.snapshots_dir());
            if offline {
                commands::league(&store, &league_id, catalog.as_ref(), None, format).await?
            } else {
                let client = sleeper_client(&config)?;
                let save_to = save.then_some(&store);
                commands::league(&client, &league_id, catalog.as_ref(), save_to, format).await?
            }
        }
        Commands::Leagues { username, season } => {
            let client = sleeper_client(&config)?;
            let season = season.unwrap_or_else(|| config.sleeper.season.clone());
            commands::leagues(&client, &username, &season, format).await?
        }
        Commands::Players {
            search,
            position,
            top,
            exclude,
        } => {
            let catalog = load_catalog(&config)?;
            let query = PlayerQuery {
                search,
                position,
                exclude,
                limit: top,
            };
            commands::players(&catalog, &query, format)?
        }
    };

    info!("Command finished in {:?}", started.elapsed());
    print!("{output}");
    Ok(())
}

fn load_catalog(config: &Config) -> anyhow::Result<PlayerCatalog> {
    let path = config.players_path();
    PlayerCatalog::load_csv(&path)
        .with_context(|| format!("failed to load player catalog {}", path.display()))
}

fn sleeper_client(config: &Config) -> anyhow::Result<SleeperClient> {
    SleeperClient::new(config.sleeper.base_url.clone(), config.sleeper_timeout())
        .context("failed to build Sleeper client")
}

/// Initialize the tracing subscriber to write to a log file.
///
/// Logs go to `<logging.directory>/tradewise.log`. `RUST_LOG` overrides the
/// configured filter.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join("tradewise.log");
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
