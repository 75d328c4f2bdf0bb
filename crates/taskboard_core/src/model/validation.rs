//! Task field validation rules.
//!
//! # Responsibility
//! - Own the length and date rules every persisted task must satisfy.
//! - Report the offending field so callers can attach messages to inputs.
//!
//! # Invariants
//! - Title length is checked on the trimmed value for the minimum and on the
//!   raw value for the maximum.
//! - Lengths count characters, not bytes.
//! - A due date equal to `today` is valid.

use crate::model::task::Task;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 200;
pub const DESCRIPTION_MAX_LENGTH: usize = 1000;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    TitleTooShort { min: usize },
    TitleTooLong { max: usize },
    DescriptionTooLong { max: usize },
    DueDateInPast { due_date: NaiveDate, today: NaiveDate },
}

impl TaskValidationError {
    /// Name of the offending field, matching the persisted key.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::DueDateInPast { .. } => "dueDate",
        }
    }
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleTooShort { min } => write!(f, "title must be at least {min} characters"),
            Self::TitleTooLong { max } => write!(f, "title must not exceed {max} characters"),
            Self::DescriptionTooLong { max } => {
                write!(f, "description must not exceed {max} characters")
            }
            Self::DueDateInPast { .. } => write!(f, "due date must be today or in the future"),
        }
    }
}

impl Error for TaskValidationError {}

pub type ValidationResult = Result<(), TaskValidationError>;

/// Partial view of a task for field-by-field validation.
///
/// `None` means "not provided" and skips the rule. `description` is doubly
/// optional so an explicitly empty description can still be checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskPatch<'a> {
    pub title: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl<'a> TaskPatch<'a> {
    /// Patch covering every field of a full task.
    pub fn from_task(task: &'a Task) -> Self {
        Self {
            title: Some(task.title.as_str()),
            description: Some(task.description.as_deref()),
            due_date: Some(task.due_date),
        }
    }

    /// Same as [`TaskPatch::from_task`] but leaves the due date unchecked.
    pub fn without_due_date(mut self) -> Self {
        self.due_date = None;
        self
    }
}

/// Rejects titles shorter than 3 characters once trimmed, or longer than
/// 200 characters as typed.
pub fn validate_title(title: &str) -> ValidationResult {
    if title.trim().chars().count() < TITLE_MIN_LENGTH {
        return Err(TaskValidationError::TitleTooShort {
            min: TITLE_MIN_LENGTH,
        });
    }
    if title.chars().count() > TITLE_MAX_LENGTH {
        return Err(TaskValidationError::TitleTooLong {
            max: TITLE_MAX_LENGTH,
        });
    }
    Ok(())
}

/// Rejects descriptions over 1000 characters. Absent or empty is fine.
pub fn validate_description(description: Option<&str>) -> ValidationResult {
    match description {
        Some(value) if value.chars().count() > DESCRIPTION_MAX_LENGTH => {
            Err(TaskValidationError::DescriptionTooLong {
                max: DESCRIPTION_MAX_LENGTH,
            })
        }
        _ => Ok(()),
    }
}

/// Rejects due dates before `today`; `today` itself is accepted.
pub fn validate_due_date(due_date: Option<NaiveDate>, today: NaiveDate) -> ValidationResult {
    match due_date {
        Some(due_date) if due_date < today => {
            Err(TaskValidationError::DueDateInPast { due_date, today })
        }
        _ => Ok(()),
    }
}

/// Validates the provided fields in order title, description, due date.
///
/// The first failing rule is returned.
pub fn validate_task(patch: &TaskPatch<'_>, today: NaiveDate) -> ValidationResult {
    if let Some(title) = patch.title {
        validate_title(title)?;
    }
    if let Some(description) = patch.description {
        validate_description(description)?;
    }
    if let Some(due_date) = patch.due_date {
        validate_due_date(due_date, today)?;
    }
    Ok(())
}

/// Collects every field error instead of stopping at the first one.
///
/// Form-style callers use this to show all messages at once.
pub fn collect_errors(patch: &TaskPatch<'_>, today: NaiveDate) -> Vec<TaskValidationError> {
    let checks = [
        patch.title.map(validate_title),
        patch.description.map(validate_description),
        patch.due_date.map(|due| validate_due_date(due, today)),
    ];
    checks
        .into_iter()
        .flatten()
        .filter_map(Result::err)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{collect_errors, TaskPatch, TaskValidationError};
    use chrono::NaiveDate;

    #[test]
    fn field_names_match_persisted_keys() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
        let err = TaskValidationError::DueDateInPast {
            due_date: today.pred_opt().expect("valid date"),
            today,
        };
        assert_eq!(err.field(), "dueDate");
        assert_eq!(
            TaskValidationError::DescriptionTooLong { max: 1000 }.field(),
            "description"
        );
    }

    #[test]
    fn collect_errors_reports_every_failing_field() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
        let long = "a".repeat(1001);
        let patch = TaskPatch {
            title: Some("ab"),
            description: Some(Some(long.as_str())),
            due_date: Some(Some(NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"))),
        };
        let fields: Vec<_> = collect_errors(&patch, today)
            .iter()
            .map(TaskValidationError::field)
            .collect();
        assert_eq!(fields, vec!["title", "description", "dueDate"]);
    }
}
