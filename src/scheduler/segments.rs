//! Segment bookkeeping
//!
//! The point of restarting a recording is bounded segment files, so the
//! scheduler keeps a log of the segments it observed: one record per
//! detected recording, closed when the recording ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recording segment as observed by the splitter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRecord {
    /// Unique segment id
    pub id: Uuid,

    /// Segment index (0, 1, 2, ...)
    pub index: usize,

    /// When the recording was first observed active
    pub started_at: DateTime<Utc>,

    /// When the recording was observed inactive again
    pub ended_at: Option<DateTime<Utc>>,

    /// Duration in milliseconds, 0 while the segment is still open
    pub duration_ms: i64,
}

/// Log of the segments produced across restart cycles
#[derive(Debug, Default)]
pub struct SegmentLog {
    records: Vec<SegmentRecord>,
}

impl SegmentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a record for a newly observed recording
    pub fn begin(&mut self) -> SegmentRecord {
        let record = SegmentRecord {
            id: Uuid::new_v4(),
            index: self.records.len(),
            started_at: Utc::now(),
            ended_at: None,
            duration_ms: 0,
        };
        self.records.push(record.clone());
        record
    }

    /// Close the open record, returning a copy of it
    pub fn finish(&mut self) -> Option<SegmentRecord> {
        let record = self.records.last_mut()?;
        if record.ended_at.is_some() {
            return None;
        }
        let now = Utc::now();
        record.ended_at = Some(now);
        record.duration_ms = (now - record.started_at).num_milliseconds();
        Some(record.clone())
    }

    /// All segments observed so far, oldest first
    pub fn records(&self) -> &[SegmentRecord] {
        &self.records
    }

    /// The currently open segment, if any
    pub fn open(&self) -> Option<&SegmentRecord> {
        self.records.last().filter(|record| record.ended_at.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_and_finish_close_a_segment() {
        let mut log = SegmentLog::new();

        let opened = log.begin();
        assert_eq!(opened.index, 0);
        assert!(log.open().is_some());

        let closed = log.finish().unwrap();
        assert_eq!(closed.id, opened.id);
        assert!(closed.ended_at.is_some());
        assert!(closed.duration_ms >= 0);
        assert!(log.open().is_none());
    }

    #[test]
    fn finish_without_open_segment_is_none() {
        let mut log = SegmentLog::new();
        assert!(log.finish().is_none());

        log.begin();
        assert!(log.finish().is_some());
        assert!(log.finish().is_none());
    }

    #[test]
    fn indices_increase_across_segments() {
        let mut log = SegmentLog::new();
        log.begin();
        log.finish();
        let second = log.begin();

        assert_eq!(second.index, 1);
        assert_eq!(log.records().len(), 2);
    }
}
