//! Criteria for listing projects.

use super::Project;
use crate::shared::DayWindow;

/// Conjunction of optional project criteria; deleted projects never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    name_contains: Option<String>,
    start_date: Option<DayWindow>,
    due_date: Option<DayWindow>,
}

impl ProjectFilter {
    /// Creates a filter matching every active project.
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

    /// Restricts to projects starting within `window`.
    #[must_use]
    pub const fn with_start_date(mut self, window: DayWindow) -> Self {
        self.start_date = Some(window);
        self
    }

    /// Restricts to projects due within `window`.
    #[must_use]
    pub const fn with_due_date(mut self, window: DayWindow) -> Self {
        self.due_date = Some(window);
        self
    }

    /// Returns the name fragment, if any.
    #[must_use]
    pub fn name_contains(&self) -> Option<&str> {
        self.name_contains.as_deref()
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

    /// Evaluates the filter against a project in memory.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        if project.is_deleted() {
            return false;
        }
        self.name_contains.as_deref().is_none_or(|fragment| {
            project
                .name()
                .as_str()
                .to_lowercase()
                .contains(&fragment.to_lowercase())
        }) && self
            .start_date
            .is_none_or(|window| window.contains_opt(project.start_date()))
            && self
                .due_date
                .is_none_or(|window| window.contains(project.due_date()))
    }
}
