use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Every state change in the system produces an Event.
/// The CLI renders them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        cursor: usize,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// A segment ran down to 00:00 and the sequencer moved on.
    SegmentCompleted {
        from_mode: Mode,
        to_mode: Mode,
        cursor: usize,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        mode: Mode,
        cursor: usize,
        at: DateTime<Utc>,
    },
    SequenceChanged {
        expanded_len: usize,
        at: DateTime<Utc>,
    },
    DurationChanged {
        mode: Mode,
        minutes: u32,
        at: DateTime<Utc>,
    },
    DeletionArmed {
        task_id: i64,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    DeletionCountdown {
        task_id: i64,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    DeletionCancelled {
        task_id: i64,
        at: DateTime<Utc>,
    },
    TaskAdded {
        task_id: i64,
        at: DateTime<Utc>,
    },
    TaskDeleted {
        task_id: i64,
        at: DateTime<Utc>,
    },
    /// Remote delete failed; the task was restored to the local list.
    TaskDeleteFailed {
        task_id: i64,
        message: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        running: bool,
        cursor: usize,
        minutes: u32,
        seconds: u32,
        display: String,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::TaskDeleted {
            task_id: 42,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TaskDeleted");
        assert_eq!(json["task_id"], 42);
    }
}
