//! Human-facing status and deadline wording for a single task.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::{local_to_utc, Task};

/// Days (from the start of today) within which a task counts as close.
const CLOSE_TO_DEADLINE_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Complete,
    PastDeadline,
    CloseToDeadline,
    Incomplete,
}

impl TaskStatus {
    /// Status of `task` as seen at `now`, measured against the start of the
    /// local day.
    pub fn of(task: &Task, now: DateTime<Utc>) -> Self {
        if task.done {
            return TaskStatus::Complete;
        }
        let today = start_of_local_day(now);
        if task.deadline < today {
            TaskStatus::PastDeadline
        } else if (task.deadline - today).num_days() <= CLOSE_TO_DEADLINE_DAYS {
            TaskStatus::CloseToDeadline
        } else {
            TaskStatus::Incomplete
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Complete => "Complete",
            TaskStatus::PastDeadline => "Past deadline",
            TaskStatus::CloseToDeadline => "Close to deadline",
            TaskStatus::Incomplete => "Incomplete",
        }
    }
}

fn start_of_local_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_timezone(&Local)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(local_to_utc)
        .unwrap_or(now)
}

/// Short relative description of a deadline, e.g. "Due tomorrow".
pub fn deadline_label(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if now > deadline {
        let minutes = (now - deadline).num_minutes();
        return if minutes < 60 {
            format!("Passed {minutes} min ago")
        } else if minutes < 1440 {
            format!("Passed {} hr ago", minutes / 60)
        } else {
            format!("Passed {} days ago", minutes / 1440)
        };
    }
    match (deadline - now).num_days() {
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        days => format!("Due in {days} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn task_due(deadline: DateTime<Utc>, done: bool) -> Task {
        Task {
            id: 1,
            created_at: Utc::now(),
            name: "Lab report".into(),
            deadline,
            done,
            description: String::new(),
            task_type: None,
        }
    }

    #[test]
    fn done_tasks_are_complete_even_when_overdue() {
        let now = Utc::now();
        let task = task_due(now - Duration::days(5), true);
        assert_eq!(TaskStatus::of(&task, now), TaskStatus::Complete);
    }

    #[test]
    fn status_follows_distance_from_start_of_day() {
        let now = Utc::now();
        assert_eq!(
            TaskStatus::of(&task_due(now - Duration::days(3), false), now),
            TaskStatus::PastDeadline
        );
        assert_eq!(
            TaskStatus::of(&task_due(now + Duration::hours(12), false), now),
            TaskStatus::CloseToDeadline
        );
        assert_eq!(
            TaskStatus::of(&task_due(now + Duration::days(10), false), now),
            TaskStatus::Incomplete
        );
    }

    #[test]
    fn past_deadline_labels_scale_units() {
        let now = Utc::now();
        assert_eq!(deadline_label(now - Duration::minutes(12), now), "Passed 12 min ago");
        assert_eq!(deadline_label(now - Duration::minutes(150), now), "Passed 2 hr ago");
        assert_eq!(deadline_label(now - Duration::days(4), now), "Passed 4 days ago");
    }

    #[test]
    fn future_deadline_labels() {
        let now = Utc::now();
        assert_eq!(deadline_label(now + Duration::hours(3), now), "Due today");
        assert_eq!(deadline_label(now + Duration::hours(30), now), "Due tomorrow");
        assert_eq!(deadline_label(now + Duration::days(5), now), "Due in 5 days");
    }
}
