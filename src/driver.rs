//! Tokio tick driver
//!
//! Drives the scheduler's `on_tick` from a fixed tokio interval. The
//! scheduler sits behind an async mutex so embedders can push config
//! updates and query phase while the driver runs.

use crate::host::RecordingHost;
use crate::scheduler::RestartScheduler;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

/// Default driver tick, short enough for the 10ms confirmation polls
pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

/// Run the scheduler forever at the given tick
pub async fn run(
    scheduler: Arc<Mutex<RestartScheduler>>,
    host: Arc<dyn RecordingHost>,
    tick: Duration,
) {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(tick_ms = tick.as_millis() as u64, "Driver started");

    loop {
        interval.tick().await;
        let now = Instant::now();
        scheduler.lock().await.on_tick(now, host.as_ref()).await;
    }
}
