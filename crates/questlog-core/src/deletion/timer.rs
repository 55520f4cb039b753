use serde::{Deserialize, Serialize};

/// Seconds between checking a task off and deleting it.
pub const DELETE_GRACE_SECS: u32 = 7;

/// Result of a single one-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionTick {
    /// Not armed; nothing happened.
    Idle,
    /// Still counting; seconds left.
    Counting(u32),
    /// Reached zero on this tick. Reported exactly once.
    Expired,
}

/// Countdown toward deleting one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionTimer {
    task_id: i64,
    remaining_secs: u32,
    armed: bool,
}

impl DeletionTimer {
    pub fn arm(task_id: i64) -> Self {
        Self::with_grace(task_id, DELETE_GRACE_SECS)
    }

    pub fn with_grace(task_id: i64, grace_secs: u32) -> Self {
        Self {
            task_id,
            remaining_secs: grace_secs,
            armed: true,
        }
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Cancel. Returns whether the timer was still live.
    pub fn disarm(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    pub fn tick(&mut self) -> DeletionTick {
        if !self.armed {
            return DeletionTick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.armed = false;
            DeletionTick::Expired
        } else {
            DeletionTick::Counting(self.remaining_secs)
        }
    }

    /// "Deleting in 3s..." while armed and above zero.
    pub fn countdown_label(&self) -> Option<String> {
        (self.armed && self.remaining_secs > 0)
            .then(|| format!("Deleting in {}s...", self.remaining_secs))
    }
}
