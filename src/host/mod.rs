//! Host capability surface
//!
//! Host-agnostic traits for the recording application the splitter drives.
//! The real host (OBS, a capture daemon, ...) lives outside this crate;
//! embedders implement `RecordingHost` over whatever IPC they have.

pub mod sim;

pub use sim::SimulatedHost;

use async_trait::async_trait;

/// Abstract recording host
///
/// `start_recording` and `stop_recording` are fire-and-forget commands:
/// their effect is observed only through `is_recording_active`, never
/// assumed from the call returning.
#[async_trait]
pub trait RecordingHost: Send + Sync {
    /// Whether the host currently has a recording in progress
    async fn is_recording_active(&self) -> bool;

    /// Ask the host to start a new recording
    async fn start_recording(&self);

    /// Ask the host to stop the current recording
    async fn stop_recording(&self);
}
