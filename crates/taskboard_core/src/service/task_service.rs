//! Task use-case service.
//!
//! # Responsibility
//! - Own the loaded task snapshot that views read from.
//! - Turn user intents (create, edit, toggle, delete) into repository calls.
//!
//! # Invariants
//! - Every successful mutation is followed by a reload, so the snapshot
//!   always mirrors storage.
//! - A failed mutation leaves the snapshot unchanged.
//! - The service never bypasses repository validation.

use crate::clock::{Clock, SystemClock};
use crate::filter::TaskFilter;
use crate::model::task::{Task, TaskDraft, TaskId, TaskStats};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::{debug, info};

pub struct TaskService<R, C = SystemClock> {
    repo: R,
    clock: C,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service on the system clock and loads the snapshot.
    pub fn new(repo: R) -> RepoResult<Self> {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> RepoResult<Self> {
        let mut service = Self {
            repo,
            clock,
            tasks: Vec::new(),
        };
        service.reload()?;
        Ok(service)
    }

    /// Re-reads the snapshot from the repository.
    pub fn reload(&mut self) -> RepoResult<()> {
        self.tasks = self.repo.find_all()?;
        debug!(
            "event=tasks_reload module=service status=ok count={}",
            self.tasks.len()
        );
        Ok(())
    }

    /// Current snapshot in storage order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Resolves a full id or a unique id prefix against the snapshot.
    pub fn resolve_id(&self, id_or_prefix: &str) -> Option<TaskId> {
        let needle = id_or_prefix.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .tasks
            .iter()
            .filter(|task| task.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task.id),
            _ => None,
        }
    }

    /// Builds, persists and returns a new task.
    pub fn create_task(&mut self, draft: TaskDraft) -> RepoResult<Task> {
        let task = Task::new(draft, self.clock.now());
        self.repo.save(&task)?;
        self.reload()?;
        info!("event=task_create module=service status=ok task_id={}", task.id);
        Ok(task)
    }

    pub fn update_task(&mut self, task: &Task) -> RepoResult<()> {
        self.repo.update(task)?;
        self.reload()
    }

    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<()> {
        self.repo.delete(id)?;
        self.reload()
    }

    /// Flips pending/completed for the task with `id`.
    ///
    /// Returns `Ok(None)` without touching storage when the id is unknown.
    pub fn toggle_task_status(&mut self, id: TaskId) -> RepoResult<Option<Task>> {
        let Some(current) = self.get(id) else {
            debug!("event=task_toggle module=service status=skipped task_id={id}");
            return Ok(None);
        };
        let toggled = current.toggled(self.clock.now());
        self.update_task(&toggled)?;
        info!(
            "event=task_toggle module=service status=ok task_id={id} new_status={}",
            toggled.status
        );
        Ok(Some(toggled))
    }

    /// Snapshot tasks passing `filter`, in storage order.
    pub fn filtered(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter.apply(&self.tasks, self.clock.today())
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::compute(&self.tasks, self.clock.today())
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}
