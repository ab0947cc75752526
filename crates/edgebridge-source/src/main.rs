//! EdgeBridge source application entry point.
//!
//! Wires the mode machine to the input hook, the outbound queue and the
//! transport, then runs until Ctrl-C.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()            -- source.toml or defaults
//!  └─ start services
//!       ├─ SendLoop            (Tokio task: queue → transport)
//!       ├─ watch_link          (Tokio task: receiver subscription changes)
//!       ├─ run_flush_timer     (Tokio task: deadline flush of held-back motion)
//!       └─ InputHook           (OS input thread → InputBridge)
//! ```
//!
//! This build has no radio or OS hook backends; it runs with
//! [`LoggingTransport`], [`LoggingWarper`] and [`MockInputHook`] so the whole
//! pipeline can be exercised headlessly.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use edgebridge_source::application::bridge_input::{InputBridge, InputHandler};
use edgebridge_source::application::mode::ModeMachine;
use edgebridge_source::infrastructure::input_capture::mock::{LoggingWarper, MockInputHook};
use edgebridge_source::infrastructure::input_capture::InputHook;
use edgebridge_source::infrastructure::outbound::{outbound_channel, run_flush_timer, SendLoop};
use edgebridge_source::infrastructure::storage::config::load_config;
use edgebridge_source::infrastructure::transport::mock::LoggingTransport;
use edgebridge_source::infrastructure::transport::{watch_link, LinkState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("loading source configuration")?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let settings = config
        .to_settings()
        .context("validating source configuration")?;

    info!(
        edge = ?settings.trigger.edge,
        threshold = settings.trigger.threshold,
        key_table = settings.key_table.name(),
        "EdgeBridge source starting"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let link = Arc::new(LinkState::new());

    // ── Send loop ─────────────────────────────────────────────────────────────
    let (outbound, queue) = outbound_channel();
    let transport = Arc::new(LoggingTransport::new(Arc::clone(&link)));
    let send_task = tokio::spawn(SendLoop::new(queue, transport, shutdown_rx.clone()).run());

    // ── Mode machine and link watcher ─────────────────────────────────────────
    let bridge = Arc::new(InputBridge::new(
        ModeMachine::new(settings, Instant::now()),
        Arc::clone(&link),
        outbound,
        Arc::new(LoggingWarper),
    ));
    let link_task = tokio::spawn(watch_link(&link, Arc::clone(&bridge), shutdown_rx.clone()));
    let flush_task = tokio::spawn(run_flush_timer(Arc::clone(&bridge), shutdown_rx));

    // ── Input hook ────────────────────────────────────────────────────────────
    let hook = MockInputHook::new();
    let handler = Arc::clone(&bridge) as Arc<dyn InputHandler>;
    if let Err(e) = hook.install(handler) {
        error!("input hook installation failed: {e}");
        hook.uninstall();
        let _ = shutdown_tx.send(true);
        let _ = send_task.await;
        let _ = link_task.await;
        let _ = flush_task.await;
        return Err(e).context("installing input hook");
    }

    info!("EdgeBridge source ready.  Press Ctrl-C to exit.");
    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;
    info!("shutdown signal received");

    // Stop new input first, hand control back locally, then drain the queue.
    hook.uninstall();
    bridge.release();
    let _ = shutdown_tx.send(true);

    match send_task.await {
        Ok(stats) => info!(
            sent = stats.sent,
            failed = stats.failed,
            merged = stats.merged,
            "send loop finished"
        ),
        Err(e) => error!("send loop task failed: {e}"),
    }
    if let Err(e) = link_task.await {
        error!("link watcher task failed: {e}");
    }
    if let Err(e) = flush_task.await {
        error!("flush timer task failed: {e}");
    }

    info!("EdgeBridge source stopped");
    Ok(())
}
