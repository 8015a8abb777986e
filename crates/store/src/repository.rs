//! The task collection and its write-through persistence.
//!
//! [`TaskRepository`] owns the in-memory task list and the [`Storage`] it
//! is mirrored to. Every successful mutation writes the whole collection
//! to the [`TASKS_SLOT`] exactly once. If that write fails, the mutation
//! is rolled back so memory and storage never disagree.

use std::collections::HashSet;

use taskboard_protocol::{Lane, ProtocolError, Task, TaskDraft, TaskId};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::storage::{Storage, TASKS_SLOT};

/// Reads the task collection from storage.
///
/// Loading never fails: a missing slot, an unreadable slot, or malformed
/// content all produce an empty collection. Failures are logged.
/// Records with a duplicate id are dropped, keeping the first.
pub fn load_all(storage: &dyn Storage) -> Vec<Task> {
    let raw = match storage.get(TASKS_SLOT) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored tasks, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "failed to read stored tasks, starting empty");
            return Vec::new();
        }
    };

    let tasks: Vec<Task> = match serde_json::from_str::<Option<Vec<Task>>>(&raw) {
        Ok(tasks) => tasks.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "stored tasks are malformed, starting empty");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let total = tasks.len();
    let tasks: Vec<Task> = tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect();
    if tasks.len() != total {
        warn!(
            dropped = total - tasks.len(),
            "dropped stored tasks with duplicate ids"
        );
    }

    debug!(count = tasks.len(), "loaded tasks");
    tasks
}

/// Writes the full task collection to storage.
///
/// # Errors
///
/// Returns an error if serialization or the slot write fails.
pub fn save_all(storage: &mut dyn Storage, tasks: &[Task]) -> Result<()> {
    let json = serde_json::to_string(tasks).map_err(ProtocolError::SerializationFailed)?;
    storage.set(TASKS_SLOT, &json)
}

/// The in-memory task collection, mirrored to storage.
///
/// Tasks keep their collection order. Lane order on the board is the
/// collection order filtered by lane, so a task that changes lanes is
/// moved to the end of the collection and lands at the bottom of its new
/// lane.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::{Lane, TaskDraft};
/// use taskboard_store::{MemoryStorage, TaskRepository};
///
/// let mut repo = TaskRepository::load(Box::new(MemoryStorage::new()));
/// let task = repo.create(TaskDraft::new("Write docs"), Lane::Todo).unwrap();
///
/// repo.move_task(&task.id, Lane::Done).unwrap();
/// assert_eq!(repo.get(&task.id).unwrap().status, Lane::Done);
/// ```
#[derive(Debug)]
pub struct TaskRepository {
    tasks: Vec<Task>,
    storage: Box<dyn Storage>,
}

impl TaskRepository {
    /// Loads the collection from storage. See [`load_all`].
    #[instrument(skip_all)]
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let tasks = load_all(storage.as_ref());
        Self { tasks, storage }
    }

    /// Returns all tasks in collection order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the tasks in a lane, in collection order.
    pub fn tasks_in(&self, lane: Lane) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |task| task.status == lane)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the backing storage.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// Creates a task from a draft and appends it to the collection.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title is blank, or a storage
    /// error if the write fails. Nothing changes in either case.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&mut self, draft: TaskDraft, lane: Lane) -> Result<Task> {
        draft.validate()?;

        let task = Task::from_draft(TaskId::generate(), draft, lane);
        self.tasks.push(task.clone());

        if let Err(e) = save_all(self.storage.as_mut(), &self.tasks) {
            self.tasks.pop();
            warn!(error = %e, "failed to persist new task, rolled back");
            return Err(e);
        }

        debug!(id = %task.id, "task created");
        Ok(task)
    }

    /// Replaces a task's editable fields. Its id, lane, and position are kept.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, a validation error for
    /// a blank title, or a storage error if the write fails. Nothing changes
    /// in any of these cases.
    #[instrument(skip(self, draft))]
    pub fn update(&mut self, id: &TaskId, draft: TaskDraft) -> Result<Task> {
        let index = self.index_of(id)?;
        draft.validate()?;

        let previous = self.tasks[index].clone();
        self.tasks[index].apply_draft(draft);

        if let Err(e) = save_all(self.storage.as_mut(), &self.tasks) {
            self.tasks[index] = previous;
            warn!(error = %e, "failed to persist task update, rolled back");
            return Err(e);
        }

        debug!("task updated");
        Ok(self.tasks[index].clone())
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, or a storage error if
    /// the write fails.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &TaskId) -> Result<()> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);

        if let Err(e) = save_all(self.storage.as_mut(), &self.tasks) {
            self.tasks.insert(index, removed);
            warn!(error = %e, "failed to persist task deletion, rolled back");
            return Err(e);
        }

        debug!("task deleted");
        Ok(())
    }

    /// Moves a task to a lane.
    ///
    /// Moving to a different lane puts the task at the end of the
    /// collection, and so at the bottom of the destination lane. Moving to
    /// the lane it is already in leaves the order unchanged. Either way the
    /// collection is written once.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown id, or a storage error if
    /// the write fails.
    #[instrument(skip(self))]
    pub fn move_task(&mut self, id: &TaskId, lane: Lane) -> Result<()> {
        let index = self.index_of(id)?;
        let from = self.tasks[index].status;

        if from == lane {
            save_all(self.storage.as_mut(), &self.tasks)?;
            debug!("task dropped on its own lane");
            return Ok(());
        }

        let mut task = self.tasks.remove(index);
        task.status = lane;
        self.tasks.push(task);

        if let Err(e) = save_all(self.storage.as_mut(), &self.tasks) {
            if let Some(mut task) = self.tasks.pop() {
                task.status = from;
                self.tasks.insert(index, task);
            }
            warn!(error = %e, "failed to persist task move, rolled back");
            return Err(e);
        }

        debug!(%from, to = %lane, "task moved");
        Ok(())
    }

    fn index_of(&self, id: &TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|task| &task.id == id)
            .ok_or_else(|| ProtocolError::TaskNotFound(id.clone()).into())
    }
}
