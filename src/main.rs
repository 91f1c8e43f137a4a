//! Demo runner
//!
//! Drives the restart scheduler against a simulated host that behaves
//! like a recording application: commands settle a few polls after they
//! are issued. Pass a settings file path as the first argument to load
//! persisted settings; otherwise a short demo configuration is used.

use anyhow::Context;
use auto_splitter::driver;
use auto_splitter::host::SimulatedHost;
use auto_splitter::scheduler::RestartScheduler;
use auto_splitter::settings::{SettingsStore, SplitterConfig};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    auto_splitter::init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => SettingsStore::new(path)
            .load_config()
            .context("failed to load settings")?,
        // Restart every ten seconds so the demo shows a full cycle quickly
        None => SplitterConfig::new(true, 10),
    };

    tracing::info!(
        enabled = config.enabled,
        interval_s = config.interval.as_secs(),
        "Starting auto-splitter v{}",
        env!("CARGO_PKG_VERSION")
    );

    let host = Arc::new(SimulatedHost::new(3));
    // Pretend the user already hit record
    host.set_active(true);

    let scheduler = Arc::new(Mutex::new(RestartScheduler::new(config, Instant::now())));

    let mut events = scheduler.lock().await.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(?event, "Splitter event");
        }
    });

    tokio::select! {
        _ = driver::run(scheduler.clone(), host.clone(), driver::DEFAULT_TICK) => {}
        _ = tokio::signal::ctrl_c() => {
            let scheduler = scheduler.lock().await;
            tracing::info!(segments = scheduler.segments().len(), "Shutting down");
        }
    }

    Ok(())
}
