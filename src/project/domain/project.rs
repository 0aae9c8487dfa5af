//! Project aggregate root.

use super::{ProjectDomainError, ProjectId};
use crate::{
    shared::{RecordDescription, RecordName, Slug},
    task::domain::TaskId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: RecordName,
    slug: Slug,
    description: RecordDescription,
    start_date: Option<DateTime<Utc>>,
    due_date: DateTime<Utc>,
    tasks: Vec<TaskId>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: RecordName,
    /// Persisted slug.
    pub slug: Slug,
    /// Persisted description.
    pub description: RecordDescription,
    /// Persisted start date, if any.
    pub start_date: Option<DateTime<Utc>>,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Task references in list order.
    pub tasks: Vec<TaskId>,
    /// Soft-deletion timestamp, if deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated set of caller-editable project fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEdit {
    /// New name.
    pub name: Option<RecordName>,
    /// New description.
    pub description: Option<RecordDescription>,
    /// New start date.
    pub start_date: Option<DateTime<Utc>>,
}

impl Project {
    /// Creates a project with an empty task list.
    #[must_use]
    pub fn new(
        name: RecordName,
        description: RecordDescription,
        start_date: Option<DateTime<Utc>>,
        due_date: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ProjectId::new(),
            slug: Slug::derive(&name),
            name,
            description,
            start_date,
            due_date,
            tasks: Vec::new(),
            is_deleted: false,
            deleted_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            slug: data.slug,
            description: data.description,
            start_date: data.start_date,
            due_date: data.due_date,
            tasks: data.tasks,
            is_deleted: data.deleted_at.is_some(),
            deleted_at: data.deleted_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub const fn name(&self) -> &RecordName {
        &self.name
    }

    /// Returns the slug derived from the current name.
    #[must_use]
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Returns the project description.
    #[must_use]
    pub const fn description(&self) -> &RecordDescription {
        &self.description
    }

    /// Returns the start date, if set.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the task references in list order.
    #[must_use]
    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    /// Returns `true` when the list references `task_id`.
    #[must_use]
    pub fn contains_task(&self, task_id: TaskId) -> bool {
        self.tasks.contains(&task_id)
    }

    /// Returns `true` once the project has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns the soft-deletion timestamp, if deleted.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies an edit to the whitelisted fields.
    pub fn apply_edit(&mut self, edit: ProjectEdit, clock: &impl Clock) {
        let ProjectEdit {
            name,
            description,
            start_date,
        } = edit;
        if let Some(new_name) = name {
            self.slug = Slug::derive(&new_name);
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if start_date.is_some() {
            self.start_date = start_date;
        }
        self.touch(clock);
    }

    /// Marks the project as deleted.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::AlreadyDeleted`] if the project was
    /// deleted before.
    pub fn soft_delete(&mut self, clock: &impl Clock) -> Result<(), ProjectDomainError> {
        if self.is_deleted {
            return Err(ProjectDomainError::AlreadyDeleted(self.id));
        }
        let now = clock.utc();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Appends a task reference without checking for duplicates.
    pub fn append_task(&mut self, task_id: TaskId, clock: &impl Clock) {
        self.tasks.push(task_id);
        self.touch(clock);
    }

    /// Adds a task reference unless the list already holds it.
    ///
    /// Returns `true` when the list changed.
    pub fn include_task(&mut self, task_id: TaskId, clock: &impl Clock) -> bool {
        if self.contains_task(task_id) {
            return false;
        }
        self.append_task(task_id, clock);
        true
    }

    /// Removes every reference to a task.
    ///
    /// Returns `true` when the list changed; removing an absent task is a
    /// no-op.
    pub fn remove_task(&mut self, task_id: TaskId, clock: &impl Clock) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|existing| *existing != task_id);
        let changed = self.tasks.len() != before;
        if changed {
            self.touch(clock);
        }
        changed
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
