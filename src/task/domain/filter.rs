//! Criteria for listing tasks.

use super::{Task, TaskStatus};
use crate::shared::DayWindow;

/// Conjunction of optional task criteria.
///
/// Soft-deleted tasks never match, whatever the criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    name_contains: Option<String>,
    status: Option<TaskStatus>,
    start_date: Option<DayWindow>,
    due_date: Option<DayWindow>,
    done_date: Option<DayWindow>,
}

impl TaskFilter {
    /// Creates a filter matching every active task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to names containing `fragment`, ignoring case.
    #[must_use]
    pub fn with_name_containing(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    /// Restricts to one status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to tasks started within `window`.
    #[must_use]
    pub const fn with_start_date(mut self, window: DayWindow) -> Self {
        self.start_date = Some(window);
        self
    }

    /// Restricts to tasks due within `window`.
    #[must_use]
    pub const fn with_due_date(mut self, window: DayWindow) -> Self {
        self.due_date = Some(window);
        self
    }

    /// Restricts to tasks finished within `window`.
    #[must_use]
    pub const fn with_done_date(mut self, window: DayWindow) -> Self {
        self.done_date = Some(window);
        self
    }

    /// Returns the name fragment, if any.
    #[must_use]
    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the start-date window, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<DayWindow> {
        self.start_date
    }

    /// Returns the due-date window, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DayWindow> {
        self.due_date
    }

    /// Returns the done-date window, if any.
    #[must_use]
    pub const fn done_date(&self) -> Option<DayWindow> {
        self.done_date
    }

    /// Evaluates the filter against a task in memory.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if task.is_deleted() {
            return false;
        }
        let name_matches = self.name_contains.as_deref().is_none_or(|fragment| {
            task.name()
                .as_str()
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        });
        name_matches
            && self.status.is_none_or(|status| task.status() == status)
            && self
                .start_date
                .is_none_or(|window| window.contains_opt(task.start_date()))
            && self
                .due_date
                .is_none_or(|window| window.contains(task.due_date()))
            && self
                .done_date
                .is_none_or(|window| window.contains_opt(task.done_date()))
    }
}
