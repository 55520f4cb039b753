use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::TaskStore;
use crate::error::StoreError;
use crate::task::{NewTask, Task};

/// In-process store with call recording and failure injection.
///
/// Contents live only as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
    delete_calls: Vec<i64>,
    fail_inserts: bool,
    fail_deletes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Inner {
                tasks,
                next_id,
                ..Inner::default()
            }),
        }
    }

    /// Snapshot of the stored tasks in insertion order.
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Ids passed to `delete_task`, in call order.
    pub fn delete_calls(&self) -> Vec<i64> {
        self.lock().delete_calls.clone()
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.lock().fail_inserts = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.lock().fail_deletes = fail;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.lock().tasks.clone();
        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(tasks)
    }

    async fn insert_task(&self, task: &NewTask) -> Result<Task, StoreError> {
        let mut inner = self.lock();
        if inner.fail_inserts {
            return Err(StoreError::Rejected {
                status: 400,
                message: "insert rejected".into(),
            });
        }
        inner.next_id += 1;
        let stored = Task {
            id: inner.next_id,
            created_at: Utc::now(),
            name: task.name.clone(),
            deadline: task.deadline,
            done: task.done,
            description: task.description.clone(),
            task_type: task.task_type,
        };
        inner.tasks.push(stored.clone());
        Ok(stored)
    }

    async fn delete_task(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.delete_calls.push(id);
        if inner.fail_deletes {
            return Err(StoreError::Unavailable("delete failed".into()));
        }
        inner.tasks.retain(|t| t.id != id);
        Ok(())
    }
}
