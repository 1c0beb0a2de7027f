//! The `confivue serve` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use confivue_server::{load_config_from, ConfivueServer};

pub async fn execute(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    catalog: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;

    // Flags win over file and environment
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(catalog) = catalog {
        config.catalog_path = catalog;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    anyhow::ensure!(config.max_items >= 1, "max_items must be at least 1");
    tracing::info!(
        catalog = %config.catalog_path.display(),
        max_items = config.max_items,
        seeded = config.seed.is_some(),
        "starting server"
    );

    let server = ConfivueServer::from_config(config).context("failed to start server")?;
    server.run().await?;
    Ok(())
}
