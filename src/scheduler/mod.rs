//! Restart scheduling
//!
//! This module implements the splitter's polling state machine:
//! - `timers`: explicit handles for the scheduler's registered callbacks
//! - `machine`: the tick-driven restart state machine
//! - `segments`: bookkeeping for the bounded segments produced

pub mod machine;
pub mod segments;
pub mod timers;

pub use machine::{Phase, RestartScheduler, SplitterEvent};
pub use segments::{SegmentLog, SegmentRecord};
pub use timers::{TimerId, TimerKind, Timers};
