//! Free-text task search.
//!
//! # Invariants
//! - A blank query (after trimming) matches every task.
//! - Matching is a case-insensitive substring test on title or description.

use crate::model::task::Task;

/// Normalized search needle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: Option<String>,
}

impl SearchQuery {
    /// Trims and lower-cases `raw`; whitespace-only input becomes a blank query.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    /// Returns `true` when the query filters nothing.
    pub fn is_blank(&self) -> bool {
        self.needle.is_none()
    }

    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Case-insensitive substring match on title or description.
    pub fn matches(&self, task: &Task) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        task.title.to_lowercase().contains(needle)
            || task
                .description
                .as_deref()
                .is_some_and(|description| description.to_lowercase().contains(needle))
    }
}

/// Keeps tasks whose title or description contains `query`.
pub fn search_tasks<'a, I>(tasks: I, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let query = SearchQuery::new(query);
    tasks.into_iter().filter(|task| query.matches(task)).collect()
}

#[cfg(test)]
mod tests {
    use super::SearchQuery;

    #[test]
    fn whitespace_only_query_is_blank() {
        assert!(SearchQuery::new("   ").is_blank());
        assert_eq!(SearchQuery::new("  BuG ").needle(), Some("bug"));
    }
}
