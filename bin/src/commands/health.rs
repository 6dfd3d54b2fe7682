//! Health command implementation.

use anyhow::{Context, Result, bail};
use std::time::Duration;
use stocksync_lib::{QuestDbStore, StoreConfig};

const STARTUP_RETRIES: u32 = 10;
const STARTUP_DELAY: Duration = Duration::from_secs(2);

/// Check whether QuestDB reports itself healthy.
pub(crate) async fn health(config: StoreConfig) -> Result<()> {
    let host = config.host.clone();
    let port = config.monitoring_port;
    let store = QuestDbStore::new(config).context("Failed to create store client")?;

    if !store.health_check().await {
        bail!("QuestDB at {host}:{port} is not healthy");
    }
    println!("QuestDB at {host}:{port} is healthy");
    Ok(())
}

/// Connect to QuestDB, waiting for it to become healthy.
pub(crate) async fn connect(config: StoreConfig) -> Result<QuestDbStore> {
    let store = QuestDbStore::new(config).context("Failed to create store client")?;
    if !store.wait_until_healthy(STARTUP_RETRIES, STARTUP_DELAY).await {
        bail!(
            "QuestDB at {} did not become healthy after {STARTUP_RETRIES} attempts",
            store.config().host
        );
    }
    tracing::info!(host = %store.config().host, "store is healthy");
    Ok(store)
}
