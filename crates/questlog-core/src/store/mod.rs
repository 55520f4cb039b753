//! Remote task store boundary.
//!
//! The core never owns task persistence; it talks to a [`TaskStore`] and
//! mirrors the results locally (see [`crate::deletion::TaskBoard`]).

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use std::future::Future;

use crate::error::StoreError;
use crate::task::{NewTask, Task};

/// Every task backend implements this trait.
pub trait TaskStore {
    /// All tasks, newest first by id.
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// Create a task and return it as stored.
    fn insert_task(&self, task: &NewTask) -> impl Future<Output = Result<Task, StoreError>> + Send;

    /// Delete by id. Deleting an id that does not exist is not an error.
    fn delete_task(&self, id: i64) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<T: TaskStore + Sync> TaskStore for &T {
    fn list_tasks(&self) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send {
        (**self).list_tasks()
    }

    fn insert_task(&self, task: &NewTask) -> impl Future<Output = Result<Task, StoreError>> + Send {
        (**self).insert_task(task)
    }

    fn delete_task(&self, id: i64) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).delete_task(id)
    }
}
