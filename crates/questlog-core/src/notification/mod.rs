//! Deadline proximity notifications.
//!
//! [`stage`] turns time-to-deadline into an urgency level; [`catalog`]
//! turns `(theme, type, stage)` into themed copy.

pub mod catalog;
mod stage;

pub use catalog::{message, TimeLeft, DEFAULT_THEME, FALLBACK_TYPE};
pub use stage::{stage, NotificationStage};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::task::Task;

/// A banner ready to show next to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub stage: NotificationStage,
    pub text: String,
}

/// Evaluate the banner for `task` under `theme_name` at `now`.
///
/// Done tasks, overdue tasks and distant deadlines produce nothing.
pub fn notification_for(task: &Task, theme_name: &str, now: DateTime<Utc>) -> Option<Notification> {
    let stage = stage(now, task.deadline, task.done)?;
    let left = TimeLeft::until(task.deadline, now);
    let text = message(theme_name, task.task_type, stage, left)?;
    Some(Notification { stage, text })
}
