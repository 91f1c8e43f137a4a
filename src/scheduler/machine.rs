//! Restart scheduler state machine
//!
//! Observes the host's recording phase and, while recording is active and
//! the feature is enabled, forces a stop+start cycle every interval. The
//! machine is tick-driven: the embedder (or `driver::run`) calls `on_tick`
//! at a short fixed cadence, and the machine fires whichever of its
//! registered callbacks are due at that instant.
//!
//! Stop and start are treated as asynchronous host commands: each is
//! confirmed by polling `is_recording_active` before the restart cycle is
//! considered complete. The confirmation polls have no timeout; the host
//! is authoritative and assumed eventually consistent.

use super::segments::{SegmentLog, SegmentRecord};
use super::timers::{TimerId, TimerKind, Timers};
use crate::host::RecordingHost;
use crate::settings::SplitterConfig;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

/// Cadence of the phase-detection polls
pub const PHASE_POLL_PERIOD: Duration = Duration::from_millis(200);

/// Cadence of the stop/start confirmation polls during a restart cycle
pub const CONFIRM_POLL_PERIOD: Duration = Duration::from_millis(10);

/// Whether the host currently has a recording in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No recording; watching for one to appear
    #[default]
    WaitingForStart,
    /// Recording in progress; the restart timer may be armed
    Recording,
}

/// Events emitted as the splitter observes and drives the host
#[derive(Debug, Clone)]
pub enum SplitterEvent {
    /// A recording was observed active
    RecordingDetected,
    /// The recording was observed inactive
    RecordingEnded,
    /// The restart interval elapsed and stop was issued
    RestartIssued,
    /// The restarted recording was confirmed active again
    RestartConfirmed,
    /// A bounded segment closed
    SegmentCompleted(SegmentRecord),
}

/// Tick-driven scheduler that splits a recording into bounded segments
pub struct RestartScheduler {
    config: SplitterConfig,
    phase: Phase,
    timers: Timers,

    // At most one live handle per callback; every transition cancels the
    // old handle before registering its successor.
    active_poll: Option<TimerId>,
    inactive_poll: Option<TimerId>,
    restart_timer: Option<TimerId>,
    stop_confirm: Option<TimerId>,
    start_retry: Option<TimerId>,

    segments: SegmentLog,
    event_tx: broadcast::Sender<SplitterEvent>,
}

impl RestartScheduler {
    /// Create a scheduler watching for a recording to start
    pub fn new(config: SplitterConfig, now: Instant) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let mut timers = Timers::new();
        let active_poll = timers.register(TimerKind::PollActive, PHASE_POLL_PERIOD, now);

        Self {
            config,
            phase: Phase::WaitingForStart,
            timers,
            active_poll: Some(active_poll),
            inactive_poll: None,
            restart_timer: None,
            stop_confirm: None,
            start_retry: None,
            segments: SegmentLog::new(),
            event_tx,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current configuration
    pub fn config(&self) -> SplitterConfig {
        self.config
    }

    /// Whether the restart timer is currently armed
    pub fn restart_timer_armed(&self) -> bool {
        self.restart_timer.is_some()
    }

    /// Segments observed so far
    pub fn segments(&self) -> &[SegmentRecord] {
        self.segments.records()
    }

    /// Subscribe to splitter events
    pub fn subscribe(&self) -> broadcast::Receiver<SplitterEvent> {
        self.event_tx.subscribe()
    }

    /// Apply a new configuration
    ///
    /// Tears down the restart timer and rebuilds it at the new interval
    /// when a recording is in progress and the feature is enabled. The
    /// phase polls are untouched.
    pub fn update_config(&mut self, config: SplitterConfig, now: Instant) {
        if let Some(id) = self.restart_timer.take() {
            self.timers.cancel(id);
        }
        self.config = config;
        if self.phase == Phase::Recording && self.config.enabled {
            self.restart_timer =
                Some(self.timers.register(TimerKind::Restart, self.config.interval, now));
        }
        tracing::info!(
            enabled = config.enabled,
            interval_s = config.interval.as_secs(),
            "Configuration updated"
        );
    }

    /// Advance the machine: fire every registered callback due at `now`
    pub async fn on_tick(&mut self, now: Instant, host: &dyn RecordingHost) {
        for (id, kind) in self.timers.take_due(now) {
            match kind {
                TimerKind::PollActive => self.poll_active(id, now, host).await,
                TimerKind::PollInactive => self.poll_inactive(id, now, host).await,
                TimerKind::Restart => self.fire_restart(id, now, host).await,
                TimerKind::ConfirmStopped => self.confirm_stop(id, now, host).await,
                TimerKind::RetryStart => self.retry_start(id, host).await,
            }
        }
    }

    /// `WaitingForStart -> Recording` once the host reports active
    async fn poll_active(&mut self, id: TimerId, now: Instant, host: &dyn RecordingHost) {
        // An earlier callback in this same tick may have superseded us
        if self.active_poll != Some(id) {
            return;
        }
        if !host.is_recording_active().await {
            return;
        }

        self.timers.cancel(id);
        self.active_poll = None;
        self.inactive_poll =
            Some(self.timers.register(TimerKind::PollInactive, PHASE_POLL_PERIOD, now));
        if self.config.enabled {
            self.restart_timer =
                Some(self.timers.register(TimerKind::Restart, self.config.interval, now));
        }
        self.phase = Phase::Recording;
        let segment = self.segments.begin();

        tracing::info!(segment = segment.index, "Recording detected");
        let _ = self.event_tx.send(SplitterEvent::RecordingDetected);
    }

    /// `Recording -> WaitingForStart` once the host reports inactive
    async fn poll_inactive(&mut self, id: TimerId, now: Instant, host: &dyn RecordingHost) {
        if self.inactive_poll != Some(id) {
            return;
        }
        if host.is_recording_active().await {
            return;
        }

        self.timers.cancel(id);
        self.inactive_poll = None;
        if let Some(timer) = self.restart_timer.take() {
            self.timers.cancel(timer);
        }
        self.active_poll =
            Some(self.timers.register(TimerKind::PollActive, PHASE_POLL_PERIOD, now));
        self.phase = Phase::WaitingForStart;

        if let Some(record) = self.segments.finish() {
            tracing::info!(
                segment = record.index,
                duration_ms = record.duration_ms,
                "Recording ended"
            );
            let _ = self.event_tx.send(SplitterEvent::SegmentCompleted(record));
        }
        let _ = self.event_tx.send(SplitterEvent::RecordingEnded);
    }

    /// The restart interval elapsed: issue stop and start confirming it
    async fn fire_restart(&mut self, id: TimerId, now: Instant, host: &dyn RecordingHost) {
        if self.restart_timer != Some(id) {
            return;
        }
        if !self.config.enabled {
            return;
        }
        if !host.is_recording_active().await {
            return;
        }
        // A previous cycle still confirming; let it finish
        if self.stop_confirm.is_some() || self.start_retry.is_some() {
            return;
        }

        host.stop_recording().await;
        self.stop_confirm =
            Some(self.timers.register(TimerKind::ConfirmStopped, CONFIRM_POLL_PERIOD, now));

        tracing::info!(
            interval_s = self.config.interval.as_secs(),
            "Restart interval elapsed, stop issued"
        );
        let _ = self.event_tx.send(SplitterEvent::RestartIssued);
    }

    /// Wait until the stop actually took effect, then begin restarting
    async fn confirm_stop(&mut self, id: TimerId, now: Instant, host: &dyn RecordingHost) {
        if self.stop_confirm != Some(id) {
            return;
        }
        if host.is_recording_active().await {
            return;
        }

        self.timers.cancel(id);
        self.stop_confirm = None;
        self.start_retry =
            Some(self.timers.register(TimerKind::RetryStart, CONFIRM_POLL_PERIOD, now));
    }

    /// Issue start every poll until the host reports active again
    async fn retry_start(&mut self, id: TimerId, host: &dyn RecordingHost) {
        if self.start_retry != Some(id) {
            return;
        }
        if host.is_recording_active().await {
            self.timers.cancel(id);
            self.start_retry = None;
            tracing::info!("Restarted recording confirmed active");
            let _ = self.event_tx.send(SplitterEvent::RestartConfirmed);
            return;
        }
        host.start_recording().await;
    }
}
