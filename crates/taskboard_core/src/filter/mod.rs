//! Cascading task filters.
//!
//! # Responsibility
//! - Combine search, status and date filters into one pure pipeline.
//!
//! # Invariants
//! - Stages run in order search -> status -> date.
//! - Filtering never reorders tasks.
//! - "Today" is always supplied by the caller.

pub mod date;
pub mod search;
pub mod status;

use crate::model::task::Task;
use chrono::NaiveDate;
use date::DateFilter;
use search::SearchQuery;
use status::StatusFilter;

/// Complete filter state. The default passes every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: SearchQuery,
    pub status: StatusFilter,
    pub date: DateFilter,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query; blank text disables the search stage.
    pub fn with_search(mut self, query: &str) -> Self {
        self.search = SearchQuery::new(query);
        self
    }

    /// Sets the status stage.
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the due-date stage.
    pub fn with_date(mut self, date: DateFilter) -> Self {
        self.date = date;
        self
    }

    /// True when every stage lets all tasks through.
    pub fn is_pass_through(&self) -> bool {
        self.search.is_blank()
            && self.status == StatusFilter::All
            && matches!(self.date, DateFilter::All)
    }

    /// Whether `task` survives all three stages.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        self.search.matches(task)
            && self.status.matches(task, today)
            && self.date.matches(task, today)
    }

    /// Applies the cascade and returns the surviving tasks in input order.
    pub fn apply<'a, I>(&self, tasks: I, today: NaiveDate) -> Vec<&'a Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks
            .into_iter()
            .filter(|task| self.matches(task, today))
            .collect()
    }
}
