//! Assetshelf server binary

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use assetshelf::{AppConfig, BrowserServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    config
        .validate()
        .context("invalid configuration")?;

    tracing::info!(root = %config.root.display(), "starting assetshelf");

    let server = BrowserServer::new(config);
    server.serve().await.context("server failed")?;

    Ok(())
}
