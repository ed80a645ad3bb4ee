use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use loot_split::api::{AppState, create_router};
use loot_split::config::{ConfigLoader, DEFAULT_CONFIG_PATH};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Loot split HTTP service.
#[derive(Parser)]
#[command(name = "loot-split", version, about = "Loot appraisal and payout split service")]
struct Args {
    /// YAML configuration file. Defaults to config/loot-split.yaml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured bind address.
    #[arg(long)]
    bind: Option<String>,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ConfigLoader> {
    match path {
        Some(path) => ConfigLoader::load(&path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None if PathBuf::from(DEFAULT_CONFIG_PATH).exists() => {
            Ok(ConfigLoader::load(DEFAULT_CONFIG_PATH)?)
        }
        None => {
            warn!(path = DEFAULT_CONFIG_PATH, "No configuration file, using defaults");
            Ok(ConfigLoader::default())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let loader = load_config(args.config)?;
    let bind_address = args
        .bind
        .unwrap_or_else(|| loader.config().server.bind_address.clone());

    let state = AppState::from_config(&loader).context("opening stores")?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {}", bind_address))?;
    info!(address = %bind_address, data_dir = %loader.config().storage.data_dir.display(), "Loot split service listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
