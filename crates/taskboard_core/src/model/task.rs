//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the repository.
//! - Provide lifecycle helpers for completion toggling.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `resolved_at` is set if and only if the task was completed through
//!   [`Task::toggled`] or created as completed.
//! - `due_date` is a calendar date; time-of-day is never stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Still open.
    Pending,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Lowercase name used in the stored blob and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Returns the opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(format!(
                "unsupported task status `{other}`; expected pending|completed"
            )),
        }
    }
}

/// Canonical task record.
///
/// Serialized with camelCase keys so blobs stay readable by the browser build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "due_date_format"
    )]
    pub due_date: Option<NaiveDate>,
}

/// Creation input: everything a caller supplies for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to [`TaskStatus::Pending`] when absent.
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

impl Task {
    /// Builds a task from a draft with a generated stable ID.
    ///
    /// # Invariants
    /// - `created_at` is `now`.
    /// - A draft created as completed is resolved at `now`.
    pub fn new(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, now)
    }

    /// Builds a task with a caller-provided ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: TaskId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        let status = draft.status.unwrap_or(TaskStatus::Pending);
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status,
            created_at: now,
            resolved_at: (status == TaskStatus::Completed).then_some(now),
            due_date: draft.due_date,
        }
    }

    /// Returns a copy with status flipped.
    ///
    /// Completing stamps `resolved_at = now`; reopening clears it.
    pub fn toggled(&self, now: DateTime<Utc>) -> Self {
        let status = self.status.toggled();
        Self {
            status,
            resolved_at: match status {
                TaskStatus::Completed => Some(now),
                TaskStatus::Pending => None,
            },
            ..self.clone()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }

    /// Pending with a due date strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_pending() && self.due_date.is_some_and(|due| due < today)
    }
}

/// Aggregate counters over a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskStats {
    /// Counts tasks by state in a single pass.
    pub fn compute<'a, I>(tasks: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::Completed => stats.completed += 1,
            }
            if task.is_overdue(today) {
                stats.overdue += 1;
            }
            stats
        })
    }

    /// Completed share of the total, rounded to a whole percent.
    ///
    /// Returns 0 for an empty list.
    pub fn completion_rate_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Serde adapter for `dueDate`.
///
/// Writes `YYYY-MM-DD`. Reads either that or an RFC 3339 instant, keeping the
/// UTC calendar date of the instant.
mod due_date_format {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const DATE_FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&raw).map(Some).map_err(de::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<NaiveDate, String> {
        let trimmed = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|instant| instant.naive_utc().date())
            .map_err(|err| format!("invalid due date `{trimmed}`: {err}"))
    }
}

/// Parses a due date the same way persisted blobs are read.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, String> {
    due_date_format::parse(raw)
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, Task, TaskDraft, TaskStats, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn new_task_defaults_to_pending_without_resolution() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let task = Task::new(TaskDraft::new("Buy groceries"), now);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.created_at, now);
        assert!(task.resolved_at.is_none());
    }

    #[test]
    fn toggling_sets_and_clears_resolved_at() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 1, 16, 9, 0, 0).unwrap();
        let task = Task::new(TaskDraft::new("Buy groceries"), now);

        let done = task.toggled(later);
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.resolved_at, Some(later));

        let reopened = done.toggled(later);
        assert_eq!(reopened.status, TaskStatus::Pending);
        assert!(reopened.resolved_at.is_none());
        assert_eq!(reopened.id, task.id);
    }

    #[test]
    fn overdue_requires_pending_and_past_due_date() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let today = date(2025, 1, 15);
        let past = Task::new(TaskDraft::new("late").with_due_date(date(2025, 1, 10)), now);
        let due_today = Task::new(TaskDraft::new("today").with_due_date(today), now);
        let completed = past.toggled(now);

        assert!(past.is_overdue(today));
        assert!(!due_today.is_overdue(today));
        assert!(!completed.is_overdue(today));
    }

    #[test]
    fn stats_count_each_bucket_and_rate() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let today = date(2025, 1, 15);
        let tasks = vec![
            Task::new(TaskDraft::new("late").with_due_date(date(2025, 1, 1)), now),
            Task::new(TaskDraft::new("open"), now),
            Task::new(
                TaskDraft::new("done").with_status(TaskStatus::Completed),
                now,
            ),
        ];

        let stats = TaskStats::compute(&tasks, today);
        assert_eq!(
            stats,
            TaskStats {
                total: 3,
                pending: 2,
                completed: 1,
                overdue: 1,
            }
        );
        assert_eq!(stats.completion_rate_percent(), 33);
        assert_eq!(TaskStats::default().completion_rate_percent(), 0);
    }

    #[test]
    fn serialized_task_uses_camel_case_and_plain_due_date() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap();
        let task = Task::new(
            TaskDraft::new("Ship release").with_due_date(date(2025, 12, 31)),
            now,
        );
        let json = serde_json::to_value(&task).expect("task should serialize");
        assert_eq!(json["dueDate"], "2025-12-31");
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("description").is_none());
        assert!(json.get("resolvedAt").is_none());
    }

    #[test]
    fn due_date_accepts_browser_instant_format() {
        let json = r#"{
            "id": "5f0c5c0e-7d1a-4c36-8f53-3c1c2a0d9b11",
            "title": "Imported",
            "status": "completed",
            "createdAt": "2025-01-01T00:00:00.000Z",
            "resolvedAt": "2025-01-02T10:00:00.000Z",
            "dueDate": "2025-12-31T00:00:00.000Z"
        }"#;
        let task: Task = serde_json::from_str(json).expect("browser blob should parse");
        assert_eq!(task.due_date, Some(date(2025, 12, 31)));
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.description.is_none());
    }

    #[test]
    fn parse_due_date_rejects_garbage() {
        assert!(parse_due_date("next tuesday").is_err());
        assert_eq!(parse_due_date(" 2025-02-03 ").unwrap(), date(2025, 2, 3));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("done".parse::<TaskStatus>().is_err());
    }
}
