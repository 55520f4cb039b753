//! Deferred deletion of completed tasks.
//!
//! Checking a task off arms a [`DeletionTimer`]; the same timer drives the
//! visible countdown and the terminal delete, so disarming is one step.
//! The [`TaskBoard`] owns every timer and the local task list.

mod board;
mod timer;

pub use board::TaskBoard;
pub use timer::{DeletionTick, DeletionTimer, DELETE_GRACE_SECS};
