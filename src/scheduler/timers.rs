//! Explicit timer handles
//!
//! Registered callbacks are identified by opaque `TimerId` values: the
//! scheduler stores the handle it gets back from `register` and passes it
//! to `cancel` when the callback is superseded. At most one entry per
//! `TimerKind` is kept alive by the scheduler.

use std::time::{Duration, Instant};

/// Opaque handle for a registered callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// The named callbacks the scheduler registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Phase poll watching for a recording to appear
    PollActive,
    /// Phase poll watching for the recording to end
    PollInactive,
    /// Fires every interval while recording to trigger a restart cycle
    Restart,
    /// Confirmation poll waiting for the host to actually stop
    ConfirmStopped,
    /// Poll issuing start commands until the host reports active again
    RetryStart,
}

#[derive(Debug)]
struct TimerEntry {
    id: TimerId,
    kind: TimerKind,
    period: Duration,
    deadline: Instant,
}

/// Repeating-callback table
///
/// Every entry repeats at its own period until cancelled, mirroring the
/// `timer_add`/`timer_remove` contract of a cooperative host scheduler.
#[derive(Debug, Default)]
pub struct Timers {
    next_id: u64,
    entries: Vec<TimerEntry>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a repeating callback; the first fire is one full period
    /// after `now`.
    pub fn register(&mut self, kind: TimerKind, period: Duration, now: Instant) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push(TimerEntry {
            id,
            kind,
            period,
            deadline: now + period,
        });
        id
    }

    /// Cancel a callback; returns false if the handle was already gone
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Collect every callback due at `now`, in registration order,
    /// rescheduling each for its next period.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerId, TimerKind)> {
        let mut due = Vec::new();
        for entry in &mut self.entries {
            if entry.deadline <= now {
                due.push((entry.id, entry.kind));
                entry.deadline = now + entry.period;
            }
        }
        due
    }

    /// Whether a live entry of this kind exists
    pub fn kind_live(&self, kind: TimerKind) -> bool {
        self.entries.iter().any(|entry| entry.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_when_due_and_repeats() {
        let now = Instant::now();
        let mut timers = Timers::new();
        let id = timers.register(TimerKind::PollActive, Duration::from_millis(200), now);

        assert!(timers.take_due(now + Duration::from_millis(100)).is_empty());

        let due = timers.take_due(now + Duration::from_millis(200));
        assert_eq!(due, vec![(id, TimerKind::PollActive)]);

        // Rescheduled for a full period after the fire
        assert!(timers.take_due(now + Duration::from_millis(300)).is_empty());
        assert_eq!(timers.take_due(now + Duration::from_millis(400)).len(), 1);
    }

    #[test]
    fn cancel_removes_the_entry() {
        let now = Instant::now();
        let mut timers = Timers::new();
        let id = timers.register(TimerKind::Restart, Duration::from_secs(1), now);

        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.take_due(now + Duration::from_secs(5)).is_empty());
        assert!(timers.is_empty());
    }

    #[test]
    fn due_entries_keep_registration_order() {
        let now = Instant::now();
        let mut timers = Timers::new();
        let first = timers.register(TimerKind::PollInactive, Duration::from_millis(10), now);
        let second = timers.register(TimerKind::ConfirmStopped, Duration::from_millis(10), now);

        let due = timers.take_due(now + Duration::from_millis(10));
        assert_eq!(
            due,
            vec![
                (first, TimerKind::PollInactive),
                (second, TimerKind::ConfirmStopped)
            ]
        );
    }
}
