use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::timer::{DeletionTick, DeletionTimer};
use crate::error::{CoreError, StoreError};
use crate::events::Event;
use crate::store::TaskStore;
use crate::task::{Task, TaskDraft};

/// Local mirror of the remote task list plus its pending deletions.
///
/// The board is the only writer of the list. Dropping it cancels every
/// pending deletion: timers only fire from [`TaskBoard::tick`].
#[derive(Debug)]
pub struct TaskBoard<S> {
    store: S,
    tasks: Vec<Task>,
    pending: BTreeMap<i64, DeletionTimer>,
}

impl<S: TaskStore> TaskBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            pending: BTreeMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replace the local list with the store's. Timers for tasks that
    /// vanished remotely are dropped.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        self.tasks = self.store.list_tasks().await?;
        let tasks = &self.tasks;
        self.pending.retain(|id, _| tasks.iter().any(|t| t.id == *id));
        debug!(count = self.tasks.len(), "task list refreshed");
        Ok(())
    }

    /// Validate and create a task. The local list only changes once the
    /// store confirmed the insert; the new task sits at the front.
    pub async fn add(&mut self, draft: &TaskDraft, now: DateTime<Utc>) -> Result<Event, CoreError> {
        let new_task = draft.validate(now)?;
        let created = self.store.insert_task(&new_task).await?;
        let task_id = created.id;
        info!(task_id, "task added");
        self.tasks.insert(0, created);
        Ok(Event::TaskAdded {
            task_id,
            at: Utc::now(),
        })
    }

    // ── Deferred deletion ────────────────────────────────────────────

    /// Start the grace countdown for `id`.
    ///
    /// No-op when `id` is unknown or already armed; an armed timer keeps its
    /// original schedule.
    pub fn arm(&mut self, id: i64) -> Option<Event> {
        if self.task(id).is_none() || self.pending.contains_key(&id) {
            return None;
        }
        let timer = DeletionTimer::arm(id);
        let remaining_secs = timer.remaining_secs();
        self.pending.insert(id, timer);
        debug!(task_id = id, remaining_secs, "deletion armed");
        Some(Event::DeletionArmed {
            task_id: id,
            remaining_secs,
            at: Utc::now(),
        })
    }

    /// Cancel the countdown for `id`. No effect once the deletion fired.
    pub fn disarm(&mut self, id: i64) -> Option<Event> {
        let mut timer = self.pending.remove(&id)?;
        timer.disarm();
        debug!(task_id = id, "deletion cancelled");
        Some(Event::DeletionCancelled {
            task_id: id,
            at: Utc::now(),
        })
    }

    pub fn is_armed(&self, id: i64) -> bool {
        self.pending.get(&id).is_some_and(DeletionTimer::is_armed)
    }

    pub fn countdown(&self, id: i64) -> Option<u32> {
        self.pending.get(&id).map(DeletionTimer::remaining_secs)
    }

    pub fn countdown_label(&self, id: i64) -> Option<String> {
        self.pending.get(&id).and_then(DeletionTimer::countdown_label)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Cancel every pending deletion.
    pub fn cancel_all(&mut self) -> Vec<Event> {
        let ids: Vec<i64> = self.pending.keys().copied().collect();
        ids.into_iter().filter_map(|id| self.disarm(id)).collect()
    }

    /// Advance every armed timer by one second and carry out the deletions
    /// that came due.
    pub async fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        let mut expired = Vec::new();

        for (id, timer) in self.pending.iter_mut() {
            match timer.tick() {
                DeletionTick::Counting(remaining_secs) => events.push(Event::DeletionCountdown {
                    task_id: *id,
                    remaining_secs,
                    at: Utc::now(),
                }),
                DeletionTick::Expired => expired.push(*id),
                DeletionTick::Idle => {}
            }
        }
        self.pending.retain(|_, timer| timer.is_armed());

        for id in expired {
            events.push(self.expire(id).await);
        }
        events
    }

    /// Delete immediately, skipping the grace period.
    ///
    /// The task disappears locally first and comes back if the store fails.
    pub async fn delete_now(&mut self, id: i64) -> Result<(), StoreError> {
        self.pending.remove(&id);
        let removed = self.take_local(id);
        match self.store.delete_task(id).await {
            Ok(()) => {
                info!(task_id = id, "task deleted");
                Ok(())
            }
            Err(e) => {
                warn!(task_id = id, error = %e, "delete failed, restoring task");
                self.restore_local(removed);
                Err(e)
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    async fn expire(&mut self, id: i64) -> Event {
        let removed = self.take_local(id);
        match self.store.delete_task(id).await {
            Ok(()) => {
                info!(task_id = id, "task deleted after grace period");
                Event::TaskDeleted {
                    task_id: id,
                    at: Utc::now(),
                }
            }
            Err(e) => {
                warn!(task_id = id, error = %e, "deferred delete failed, restoring task");
                self.restore_local(removed);
                Event::TaskDeleteFailed {
                    task_id: id,
                    message: e.to_string(),
                    at: Utc::now(),
                }
            }
        }
    }

    fn take_local(&mut self, id: i64) -> Option<(usize, Task)> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some((index, self.tasks.remove(index)))
    }

    fn restore_local(&mut self, removed: Option<(usize, Task)>) {
        if let Some((index, task)) = removed {
            let index = index.min(self.tasks.len());
            self.tasks.insert(index, task);
        }
    }
}
