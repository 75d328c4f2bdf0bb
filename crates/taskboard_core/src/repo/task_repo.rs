//! Task repository contract and key-value implementation.
//!
//! # Responsibility
//! - Provide CRUD over the task list stored as one JSON blob.
//! - Keep serialization details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate before touching storage.
//! - The blob lives under [`TASKS_STORAGE_KEY`] and keeps insertion order.
//! - A corrupt blob reads as an empty list and is logged, never surfaced.
//! - Storage read failures propagate; they are not mistaken for "no tasks".

use crate::clock::{Clock, SystemClock};
use crate::model::task::{Task, TaskId};
use crate::model::validation::{validate_task, TaskPatch, TaskValidationError};
use crate::storage::{KeyValueStore, StorageError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key holding the serialized task list.
pub const TASKS_STORAGE_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    AlreadyExists(TaskId),
    NotFound(TaskId),
    /// The store refused the write for lack of space.
    QuotaExceeded(StorageError),
    Storage(StorageError),
    Serialization(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::AlreadyExists(id) => write!(f, "task with id {id} already exists"),
            Self::NotFound(id) => write!(f, "task with id {id} not found"),
            Self::QuotaExceeded(_) => write!(f, "storage quota exceeded; delete some tasks"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to serialize tasks: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::QuotaExceeded(err) | Self::Storage(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::AlreadyExists(_) | Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        match value {
            quota @ StorageError::QuotaExceeded { .. } => Self::QuotaExceeded(quota),
            other => Self::Storage(other),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Appends a new task. Fails on duplicate id.
    fn save(&self, task: &Task) -> RepoResult<()>;
    /// Replaces an existing task in place.
    fn update(&self, task: &Task) -> RepoResult<()>;
    /// Removes a task; missing ids are ignored.
    fn delete(&self, id: TaskId) -> RepoResult<()>;
    fn find_by_id(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn find_all(&self) -> RepoResult<Vec<Task>>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn save(&self, task: &Task) -> RepoResult<()> {
        (**self).save(task)
    }

    fn update(&self, task: &Task) -> RepoResult<()> {
        (**self).update(task)
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        (**self).delete(id)
    }

    fn find_by_id(&self, id: TaskId) -> RepoResult<Option<Task>> {
        (**self).find_by_id(id)
    }

    fn find_all(&self) -> RepoResult<Vec<Task>> {
        (**self).find_all()
    }
}

/// Task repository persisting the whole list under one key.
pub struct KeyValueTaskRepository<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> KeyValueTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> KeyValueTaskRepository<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    fn load(&self) -> RepoResult<Vec<Task>> {
        let Some(raw) = self.store.get(TASKS_STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                error!(
                    "event=tasks_load module=repo status=error error_code=corrupt_blob bytes={} error={err}",
                    raw.len()
                );
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, tasks: &[Task]) -> RepoResult<()> {
        let raw = serde_json::to_string(tasks)?;
        if let Err(err) = self.store.set(TASKS_STORAGE_KEY, &raw) {
            let err = RepoError::from(err);
            if matches!(err, RepoError::QuotaExceeded(_)) {
                warn!(
                    "event=tasks_persist module=repo status=error error_code=quota_exceeded count={} bytes={}",
                    tasks.len(),
                    raw.len()
                );
            } else {
                error!(
                    "event=tasks_persist module=repo status=error error_code=storage_failed error={err}"
                );
            }
            return Err(err);
        }
        Ok(())
    }
}

impl<S: KeyValueStore, C: Clock> TaskRepository for KeyValueTaskRepository<S, C> {
    fn save(&self, task: &Task) -> RepoResult<()> {
        validate_task(&TaskPatch::from_task(task), self.clock.today())?;

        let mut tasks = self.load()?;
        if tasks.iter().any(|existing| existing.id == task.id) {
            return Err(RepoError::AlreadyExists(task.id));
        }

        tasks.push(task.clone());
        self.persist(&tasks)?;
        info!(
            "event=task_save module=repo status=ok task_id={} count={}",
            task.id,
            tasks.len()
        );
        Ok(())
    }

    fn update(&self, task: &Task) -> RepoResult<()> {
        let mut tasks = self.load()?;
        let Some(slot) = tasks.iter_mut().find(|existing| existing.id == task.id) else {
            validate_task(&TaskPatch::from_task(task), self.clock.today())?;
            return Err(RepoError::NotFound(task.id));
        };

        // Unchanged due dates are not re-checked so past-due tasks stay editable.
        let patch = if slot.due_date == task.due_date {
            TaskPatch::from_task(task).without_due_date()
        } else {
            TaskPatch::from_task(task)
        };
        validate_task(&patch, self.clock.today())?;

        *slot = task.clone();
        self.persist(&tasks)?;
        info!("event=task_update module=repo status=ok task_id={}", task.id);
        Ok(())
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        self.persist(&tasks)?;
        info!(
            "event=task_delete module=repo status=ok task_id={id} removed={}",
            before - tasks.len()
        );
        Ok(())
    }

    fn find_by_id(&self, id: TaskId) -> RepoResult<Option<Task>> {
        Ok(self.load()?.into_iter().find(|task| task.id == id))
    }

    fn find_all(&self) -> RepoResult<Vec<Task>> {
        self.load()
    }
}
