//! Task aggregate root and its edit payload.

use super::{TaskDomainError, TaskId, TaskStatus};
use crate::{
    project::domain::ProjectId,
    shared::{RecordDescription, RecordName, Slug},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Task aggregate root.
///
/// `is_assigned` and `project` only change together, through
/// [`Task::assign_to`] and [`Task::move_to`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    name: RecordName,
    slug: Slug,
    description: RecordDescription,
    status: TaskStatus,
    start_date: Option<DateTime<Utc>>,
    due_date: DateTime<Utc>,
    done_date: Option<DateTime<Utc>>,
    is_assigned: bool,
    project: Option<ProjectId>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: RecordName,
    /// Persisted slug.
    pub slug: Slug,
    /// Persisted description.
    pub description: RecordDescription,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted start date, if any.
    pub start_date: Option<DateTime<Utc>>,
    /// Persisted due date.
    pub due_date: DateTime<Utc>,
    /// Persisted done date, if any.
    pub done_date: Option<DateTime<Utc>>,
    /// Project the task belongs to, if any.
    pub project: Option<ProjectId>,
    /// Soft-deletion timestamp, if deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated set of caller-editable task fields.
///
/// Deletion state, creation time, the due date, and the project reference
/// are not editable and have no field here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// New name.
    pub name: Option<RecordName>,
    /// New description.
    pub description: Option<RecordDescription>,
    /// New status; `todo` and `done` stamp their dates.
    pub status: Option<TaskStatus>,
    /// Caller-supplied start date, overridden when `status` is `todo`.
    pub start_date: Option<DateTime<Utc>>,
    /// Caller-supplied done date, overridden when `status` is `done`.
    pub done_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new, unassigned task in the `available` status.
    #[must_use]
    pub fn new(
        name: RecordName,
        description: RecordDescription,
        due_date: DateTime<Utc>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            slug: Slug::derive(&name),
            name,
            description,
            status: TaskStatus::Available,
            start_date: None,
            due_date,
            done_date: None,
            is_assigned: false,
            project: None,
            is_deleted: false,
            deleted_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            slug: data.slug,
            description: data.description,
            status: data.status,
            start_date: data.start_date,
            due_date: data.due_date,
            done_date: data.done_date,
            is_assigned: data.project.is_some(),
            project: data.project,
            is_deleted: data.deleted_at.is_some(),
            deleted_at: data.deleted_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &RecordName {
        &self.name
    }

    /// Returns the slug derived from the current name.
    #[must_use]
    pub const fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Returns the task description.
    #[must_use]
    pub const fn description(&self) -> &RecordDescription {
        &self.description
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns when the task last entered `todo`, if ever.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns when the task last entered `done`, if ever.
    #[must_use]
    pub const fn done_date(&self) -> Option<DateTime<Utc>> {
        self.done_date
    }

    /// Returns `true` when the task belongs to a project.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.is_assigned
    }

    /// Returns the owning project, if any.
    #[must_use]
    pub const fn project(&self) -> Option<ProjectId> {
        self.project
    }

    /// Returns `true` once the task has been soft-deleted.
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

    /// Applies an edit.
    ///
    /// Plain fields are applied first; a status change to `todo` or `done`
    /// then stamps `start_date` or `done_date` with the current time,
    /// replacing any value supplied in the same edit.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) {
        let now = clock.utc();
        let TaskEdit {
            name,
            description,
            status,
            start_date,
            done_date,
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
        if done_date.is_some() {
            self.done_date = done_date;
        }
        if let Some(new_status) = status {
            self.status = new_status;
            match new_status {
                TaskStatus::Todo => self.start_date = Some(now),
                TaskStatus::Done => self.done_date = Some(now),
                TaskStatus::Available => {}
            }
        }
        self.updated_at = now;
    }

    /// Returns the task to `available` and clears both progress dates.
    ///
    /// Project assignment is left untouched.
    pub fn reset(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Available;
        self.start_date = None;
        self.done_date = None;
        self.touch(clock);
    }

    /// Marks the task as deleted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyDeleted`] if the task was deleted
    /// before.
    pub fn soft_delete(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.is_deleted {
            return Err(TaskDomainError::AlreadyDeleted(self.id));
        }
        let now = clock.utc();
        self.is_deleted = true;
        self.deleted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Assigns an unassigned task to a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AlreadyAssigned`] when the task already
    /// belongs to a project; the task is left unchanged.
    pub fn assign_to(
        &mut self,
        project_id: ProjectId,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if let Some(current) = self.project {
            return Err(TaskDomainError::AlreadyAssigned {
                task_id: self.id,
                project_id: current,
            });
        }
        self.project = Some(project_id);
        self.is_assigned = true;
        self.touch(clock);
        Ok(())
    }

    /// Points the task at another project regardless of its current owner.
    pub fn move_to(&mut self, project_id: ProjectId, clock: &impl Clock) {
        self.project = Some(project_id);
        self.is_assigned = true;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
