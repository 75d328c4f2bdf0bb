//! Status-based task filter.

use crate::model::task::{Task, TaskStatus};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
    /// Pending with a due date strictly before today.
    Overdue,
}

impl StatusFilter {
    pub const ALL_VARIANTS: [Self; 4] = [Self::All, Self::Pending, Self::Completed, Self::Overdue];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// `Overdue` keeps pending tasks due strictly before `today`.
    pub fn matches(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Pending => task.status == TaskStatus::Pending,
            Self::Completed => task.status == TaskStatus::Completed,
            Self::Overdue => task.is_overdue(today),
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL_VARIANTS
            .into_iter()
            .find(|variant| variant.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unsupported status filter `{normalized}`; expected all|pending|completed|overdue"
                )
            })
    }
}

/// Keeps tasks accepted by `filter`.
pub fn filter_by_status<'a, I>(tasks: I, filter: StatusFilter, today: NaiveDate) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| filter.matches(task, today))
        .collect()
}
