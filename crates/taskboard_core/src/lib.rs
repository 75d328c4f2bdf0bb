//! Core domain logic for Taskboard.
//! This crate is the single source of truth for task rules, filtering and
//! persistence.

pub mod clock;
pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, TaskboardConfig};
pub use filter::date::{filter_by_date, DateFilter, DateRange};
pub use filter::search::{search_tasks, SearchQuery};
pub use filter::status::{filter_by_status, StatusFilter};
pub use filter::TaskFilter;
pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use model::task::{parse_due_date, Task, TaskDraft, TaskId, TaskStats, TaskStatus};
pub use model::validation::{
    collect_errors, validate_description, validate_due_date, validate_task, validate_title,
    TaskPatch, TaskValidationError,
};
pub use repo::task_repo::{
    KeyValueTaskRepository, RepoError, RepoResult, TaskRepository, TASKS_STORAGE_KEY,
};
pub use service::task_service::TaskService;
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
