//! Simulated recording host
//!
//! An in-process host whose stop/start commands settle only after a
//! configurable number of status polls, modelling a real host that is
//! asynchronous and eventually consistent. Used by the test suite and the
//! demo binary.

use super::RecordingHost;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// A command whose effect has not been observed yet
#[derive(Debug, Clone, Copy)]
struct PendingChange {
    active: bool,
    polls_remaining: u32,
}

#[derive(Debug)]
struct SimState {
    active: bool,
    pending: Option<PendingChange>,
    starts_issued: u64,
    stops_issued: u64,
}

/// Simulated host, cheap to clone and share across tasks
#[derive(Clone)]
pub struct SimulatedHost {
    settle_polls: u32,
    state: Arc<Mutex<SimState>>,
}

impl SimulatedHost {
    /// Create a host whose commands take effect only after `settle_polls`
    /// further status polls (0 = near-instantaneous).
    pub fn new(settle_polls: u32) -> Self {
        Self {
            settle_polls,
            state: Arc::new(Mutex::new(SimState {
                active: false,
                pending: None,
                starts_issued: 0,
                stops_issued: 0,
            })),
        }
    }

    /// Flip the recording state immediately, as an external actor
    /// (e.g. the user pressing record) would.
    pub fn set_active(&self, active: bool) {
        let mut state = self.state.lock();
        state.active = active;
        state.pending = None;
    }

    /// Current state without consuming a settle poll
    pub fn is_active_now(&self) -> bool {
        self.state.lock().active
    }

    /// How many start commands the splitter has issued
    pub fn starts_issued(&self) -> u64 {
        self.state.lock().starts_issued
    }

    /// How many stop commands the splitter has issued
    pub fn stops_issued(&self) -> u64 {
        self.state.lock().stops_issued
    }
}

#[async_trait]
impl RecordingHost for SimulatedHost {
    async fn is_recording_active(&self) -> bool {
        let mut state = self.state.lock();
        match state.pending {
            Some(pending) if pending.polls_remaining == 0 => {
                state.active = pending.active;
                state.pending = None;
            }
            Some(pending) => {
                state.pending = Some(PendingChange {
                    polls_remaining: pending.polls_remaining - 1,
                    ..pending
                });
            }
            None => {}
        }
        state.active
    }

    async fn start_recording(&self) {
        let mut state = self.state.lock();
        state.starts_issued += 1;
        if !state.active {
            // Repeated starts while one is settling do not reset the countdown
            state.pending.get_or_insert(PendingChange {
                active: true,
                polls_remaining: self.settle_polls,
            });
        }
    }

    async fn stop_recording(&self) {
        let mut state = self.state.lock();
        state.stops_issued += 1;
        if state.active {
            state.pending.get_or_insert(PendingChange {
                active: false,
                polls_remaining: self.settle_polls,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_settle_after_polls() {
        let host = SimulatedHost::new(2);
        host.set_active(true);

        host.stop_recording().await;
        assert_eq!(host.stops_issued(), 1);

        // Still active until the settle polls are consumed
        assert!(host.is_recording_active().await);
        assert!(host.is_recording_active().await);
        assert!(!host.is_recording_active().await);

        host.start_recording().await;
        assert!(!host.is_recording_active().await);
        assert!(!host.is_recording_active().await);
        assert!(host.is_recording_active().await);
    }

    #[tokio::test]
    async fn set_active_is_immediate() {
        let host = SimulatedHost::new(5);
        host.set_active(true);
        assert!(host.is_recording_active().await);

        host.set_active(false);
        assert!(!host.is_recording_active().await);
    }

    #[tokio::test]
    async fn redundant_commands_are_noops() {
        let host = SimulatedHost::new(0);
        host.set_active(true);

        // Starting while already active changes nothing
        host.start_recording().await;
        assert!(host.is_recording_active().await);
        assert_eq!(host.starts_issued(), 1);
    }
}
