//! Auto-splitter - bounded recording segments, made simple.
//!
//! Restarts an active recording at a fixed interval so no single file
//! grows unbounded. The crate is host-agnostic: the recording host hides
//! behind `host::RecordingHost`, the restart logic is an explicit
//! tick-driven state machine in `scheduler`, and `driver` supplies a
//! tokio loop to run it.

pub mod driver;
pub mod host;
pub mod scheduler;
pub mod settings;
pub mod utils;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for the binary
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auto_splitter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
