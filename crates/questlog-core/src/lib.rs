//! # Questlog Core Library
//!
//! The temporal logic behind the Questlog todo list and focus timer. All
//! operations are available through the standalone `questlog` CLI, which is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Deferred deletion**: checking a task off arms a 7-second countdown;
//!   unchecking cancels it, expiry deletes the task from the remote store
//! - **Notifications**: deadline proximity stages and themed banner copy
//! - **Timer**: a cyclic, user-editable Pomodoro sequence that auto-advances
//! - **Store**: the remote task table, behind the [`TaskStore`] trait
//!
//! None of the state machines owns a thread or a timer. The caller advances
//! them once per second, typically from a [`Ticker`].
//!
//! ## Key Components
//!
//! - [`TaskBoard`]: local task list plus pending deletions
//! - [`PomodoroSequencer`]: work/break state machine
//! - [`stage`] / [`notification_for`]: deadline staging
//! - [`Config`]: application configuration

pub mod clock;
pub mod deletion;
pub mod error;
pub mod events;
pub mod notification;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;
pub mod timer;

pub use clock::Ticker;
pub use deletion::{DeletionTimer, TaskBoard, DELETE_GRACE_SECS};
pub use error::{AlertError, ConfigError, CoreError, StoreError, ValidationError};
pub use events::Event;
pub use notification::{notification_for, stage, Notification, NotificationStage};
pub use storage::Config;
pub use store::{MemoryStore, RestStore, TaskStore};
pub use task::{NewTask, Task, TaskDraft, TaskStatus, TaskType};
pub use theme::{theme_config, ThemeConfig};
pub use timer::{format_time, Durations, Mode, PomodoroSequencer, Sequence, SequenceEntry};
