//! Due-date range filter.
//!
//! # Invariants
//! - Weeks start on Sunday and span seven days, both ends inclusive.
//! - Months span the first through the last calendar day, inclusive.
//! - Every variant except `All`, `NoDate` and an unbounded `Custom` rejects
//!   tasks without a due date.

use crate::model::task::Task;
use chrono::{Datelike, Days, NaiveDate};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Inclusive calendar range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Inclusive on both ends; a missing bound is open.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    /// Sunday-start week containing `today`.
    pub fn week_of(today: NaiveDate) -> Self {
        let offset = u64::from(today.weekday().num_days_from_sunday());
        let start = today - Days::new(offset);
        Self::new(Some(start), start.checked_add_days(Days::new(6)))
    }

    /// Calendar month containing `today`.
    pub fn month_of(today: NaiveDate) -> Self {
        let start = today.with_day(1);
        let end = start
            .and_then(|first| first.checked_add_months(chrono::Months::new(1)))
            .and_then(|next_first| next_first.pred_opt());
        Self::new(start, end)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    ThisWeek,
    ThisMonth,
    NoDate,
    Custom(DateRange),
}

impl DateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
            Self::NoDate => "no_date",
            Self::Custom(_) => "custom",
        }
    }

    /// Undated tasks pass only `All`, `NoDate` and an unbounded `Custom` range.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::NoDate => task.due_date.is_none(),
            Self::Custom(range) if range.is_unbounded() => true,
            Self::Today => task.due_date == Some(today),
            Self::ThisWeek => Self::due_within(task, DateRange::week_of(today)),
            Self::ThisMonth => Self::due_within(task, DateRange::month_of(today)),
            Self::Custom(range) => Self::due_within(task, *range),
        }
    }

    fn due_within(task: &Task, range: DateRange) -> bool {
        task.due_date.is_some_and(|due| range.contains(due))
    }
}

impl Display for DateFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a filter kind. `custom` yields an unbounded range.
impl FromStr for DateFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "this_week" => Ok(Self::ThisWeek),
            "this_month" => Ok(Self::ThisMonth),
            "no_date" => Ok(Self::NoDate),
            "custom" => Ok(Self::Custom(DateRange::default())),
            other => Err(format!(
                "unsupported date filter `{other}`; expected all|today|this_week|this_month|no_date|custom"
            )),
        }
    }
}

/// Keeps tasks accepted by `filter`.
pub fn filter_by_date<'a, I>(tasks: I, filter: &DateFilter, today: NaiveDate) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| filter.matches(task, today))
        .collect()
}
