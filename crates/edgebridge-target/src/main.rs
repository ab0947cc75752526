//! EdgeBridge target application entry point.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()           -- target.toml or defaults
//!  └─ inbound_channel()       -- radio backend → receive loop
//!  └─ run_inbound()           (Tokio task)
//!       └─ InboundDispatcher  -- decode, translate keys, inject
//! ```
//!
//! This build has no radio or injection backends.  The [`LoggingInjector`]
//! logs what would be injected, and the notification sender is held open
//! until shutdown so a backend can be attached in its place.

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use edgebridge_target::application::dispatch_inbound::InboundDispatcher;
use edgebridge_target::infrastructure::injection::LoggingInjector;
use edgebridge_target::infrastructure::link::{inbound_channel, run_inbound};
use edgebridge_target::infrastructure::storage::config::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading target configuration")?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let key_table = config
        .key_table()
        .context("validating target configuration")?;
    info!(key_table = key_table.name(), "EdgeBridge target starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (notifications, inbound) = inbound_channel();
    let dispatcher = InboundDispatcher::new(Arc::new(LoggingInjector), key_table);
    let inbound_task = tokio::spawn(run_inbound(inbound, dispatcher, shutdown_rx));

    info!("EdgeBridge target ready.  Press Ctrl-C to exit.");
    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("shutdown signal received");

    let _ = shutdown_tx.send(true);
    drop(notifications);
    if let Err(e) = inbound_task.await {
        error!("inbound loop task failed: {e}");
    }

    info!("EdgeBridge target stopped");
    Ok(())
}
