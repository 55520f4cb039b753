//! Task model, user input validation and the remote wire format.
//!
//! Tasks are owned by the remote store; the core treats them as values.
//! A [`TaskDraft`] is what the user typed, a [`NewTask`] is what gets sent to
//! the store once validation passed.

mod status;

pub use status::{deadline_label, TaskStatus};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Minimum distance between "now" and a new task's deadline.
pub const MIN_LEAD_MINUTES: i64 = 30;

/// Category tag attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Everyday,
    Math,
    English,
    Science,
    History,
    Other,
}

impl TaskType {
    pub const ALL: [TaskType; 6] = [
        TaskType::Everyday,
        TaskType::Math,
        TaskType::English,
        TaskType::Science,
        TaskType::History,
        TaskType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Everyday => "everyday",
            TaskType::Math => "math",
            TaskType::English => "english",
            TaskType::Science => "science",
            TaskType::History => "history",
            TaskType::Other => "other",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TaskType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ValidationError::UnknownTaskType(s.to_string()))
    }
}

/// A task as stored in the remote table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(deserialize_with = "wire_time::deserialize")]
    pub created_at: DateTime<Utc>,
    pub name: String,
    #[serde(deserialize_with = "wire_time::deserialize")]
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub done: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_task_type"
    )]
    pub task_type: Option<TaskType>,
}

/// Fields sent to the store when creating a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub name: String,
    pub deadline: DateTime<Utc>,
    pub done: bool,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: Option<TaskType>,
}

/// Raw user input for a new task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub name: String,
    pub deadline: String,
    pub description: String,
    pub task_type: Option<TaskType>,
}

impl TaskDraft {
    /// Validate the draft against `now`.
    ///
    /// Nothing is sent anywhere on failure.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<NewTask, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let deadline = parse_deadline(&self.deadline)?;
        if (deadline - now).num_minutes() < MIN_LEAD_MINUTES {
            return Err(ValidationError::DeadlineTooSoon {
                min_minutes: MIN_LEAD_MINUTES,
            });
        }
        Ok(NewTask {
            name: name.to_string(),
            deadline,
            done: false,
            description: self.description.clone(),
            task_type: self.task_type,
        })
    }
}

/// Parse a deadline typed by the user.
///
/// A bare date (`YYYY-MM-DD`) means the end of that day in local time.
/// Longer inputs are RFC 3339 or a local `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_deadline(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::MissingDeadline);
    }
    let unparseable = || ValidationError::UnparseableDeadline(input.to_string());

    if input.len() <= 10 {
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| unparseable())?;
        let end_of_day = date.and_hms_milli_opt(23, 59, 59, 999).ok_or_else(unparseable)?;
        return local_to_utc(end_of_day).ok_or_else(unparseable);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return local_to_utc(naive).ok_or_else(unparseable);
        }
    }
    Err(unparseable())
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_task_type<'de, D>(deserializer: D) -> Result<Option<TaskType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

/// Timestamps from the store come either with an offset or as naive UTC.
mod wire_time {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
            .map(|naive| naive.and_utc())
            .map_err(|_| de::Error::custom(format!("invalid timestamp '{raw}'")))
    }
}
