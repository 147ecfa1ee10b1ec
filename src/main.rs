mod shell;

use anyhow::Context;
use house_hunt::config::Config;
use house_hunt::listings::RealtorClient;
use house_hunt::search::SearchCoordinator;
use shell::Shell;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging on stderr, results go to stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("🏠 House Hunt - multi-area listing search");

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        endpoint = %config.endpoint,
        timeout_secs = config.request_timeout.as_secs(),
        date_policy = ?config.date_policy,
        "Loaded configuration"
    );

    let client = RealtorClient::new(&config)?;
    let coordinator = SearchCoordinator::new(Arc::new(client));

    Shell::new(coordinator).run().await
}
