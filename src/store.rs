//! The task store: authoritative in-memory collection plus persisted mirror.
//!
//! Every mutation writes the full collection back to storage before
//! returning, so the persisted slot always reflects the last completed
//! operation. Operations on an unknown id are silent no-ops; callers that
//! want a "not found" error check with [`TaskStore::get`] first.

use crate::error::Result;
use crate::storage::Storage;
use crate::task::{Priority, Task, TaskPatch};

/// The three priority buckets, each preserving collection order.
#[derive(Debug, Clone, Default)]
pub struct PriorityBuckets {
    pub low: Vec<Task>,
    pub medium: Vec<Task>,
    pub high: Vec<Task>,
}

impl PriorityBuckets {
    pub fn bucket(&self, priority: Priority) -> &[Task] {
        match priority {
            Priority::Low => &self.low,
            Priority::Medium => &self.medium,
            Priority::High => &self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low.len() + self.medium.len() + self.high.len()
    }
}

#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open the store, loading the persisted collection. Missing or
    /// malformed data yields an empty collection (fail-closed).
    pub fn open(storage: Storage) -> Self {
        let tasks = storage.load_tasks();
        Self { storage, tasks }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replace the task with the same id, or append at the end. Insertion
    /// order of existing tasks is preserved; new tasks go last.
    pub fn upsert(&mut self, task: Task) -> Result<()> {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
        self.persist()
    }

    /// Remove the task with the given id. Unknown ids are a silent no-op,
    /// so removing twice is idempotent.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Flip the completion flag, routing through `upsert`.
    pub fn toggle_completed(&mut self, id: &str) -> Result<()> {
        let Some(task) = self.get(id) else {
            return Ok(());
        };
        let mut updated = task.clone();
        updated.completed = !updated.completed;
        self.upsert(updated)
    }

    /// Merge a partial field set over the task, routing through `upsert`.
    /// The id is never overwritten by the patch.
    pub fn edit_fields(&mut self, id: &str, patch: TaskPatch) -> Result<()> {
        let Some(task) = self.get(id) else {
            return Ok(());
        };
        let mut updated = task.clone();
        patch.apply(&mut updated);
        self.upsert(updated)
    }

    /// Partition the collection into the three buckets, preserving
    /// collection order within each bucket.
    pub fn partition_by_priority(&self) -> PriorityBuckets {
        let mut buckets = PriorityBuckets::default();
        for task in &self.tasks {
            match task.priority {
                Priority::Low => buckets.low.push(task.clone()),
                Priority::Medium => buckets.medium.push(task.clone()),
                Priority::High => buckets.high.push(task.clone()),
            }
        }
        buckets
    }

    fn persist(&self) -> Result<()> {
        self.storage.save_tasks(&self.tasks)
    }
}
