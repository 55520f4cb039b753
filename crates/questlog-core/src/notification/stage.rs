use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Urgency level of an open task.
///
/// `Distant` is a real stage but callers show no banner for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum NotificationStage {
    Distant = 0,
    Approaching = 1,
    DueSoon = 2,
    Imminent = 3,
}

impl NotificationStage {
    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Whether a banner should be shown at all.
    pub fn is_active(&self) -> bool {
        *self != NotificationStage::Distant
    }
}

impl From<NotificationStage> for u8 {
    fn from(stage: NotificationStage) -> Self {
        stage.level()
    }
}

impl TryFrom<u8> for NotificationStage {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(NotificationStage::Distant),
            1 => Ok(NotificationStage::Approaching),
            2 => Ok(NotificationStage::DueSoon),
            3 => Ok(NotificationStage::Imminent),
            other => Err(format!("unknown notification stage {other}")),
        }
    }
}

const IMMINENT_HOURS: i64 = 6;
const DUE_SOON_HOURS: i64 = 24;
const APPROACHING_HOURS: i64 = 72;

/// Stage for a task due at `deadline`, evaluated at `now`.
///
/// Upper bounds are inclusive: exactly six hours out is still `Imminent`.
pub fn stage(now: DateTime<Utc>, deadline: DateTime<Utc>, done: bool) -> Option<NotificationStage> {
    if done {
        return None;
    }
    let left = deadline - now;
    if left <= Duration::zero() {
        None
    } else if left <= Duration::hours(IMMINENT_HOURS) {
        Some(NotificationStage::Imminent)
    } else if left <= Duration::hours(DUE_SOON_HOURS) {
        Some(NotificationStage::DueSoon)
    } else if left <= Duration::hours(APPROACHING_HOURS) {
        Some(NotificationStage::Approaching)
    } else {
        Some(NotificationStage::Distant)
    }
}
