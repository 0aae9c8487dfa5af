//! Service layer for task creation, editing, reset, deletion, and listing.

use crate::{
    shared::{
        Calendar, CalendarError, DeletionScope, ErrorKind, RecordDescription, RecordName,
        TextFieldError,
    },
    task::{
        domain::{
            ParseTaskStatusError, Task, TaskDomainError, TaskEdit, TaskFilter, TaskId, TaskStatus,
        },
        ports::{TaskRepository, TaskRepositoryError},
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    name: String,
    description: String,
    due_date: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Creates a request with every required task field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            due_date,
        }
    }
}

/// Partial update of a task.
///
/// Deserializes from a camelCase JSON object. Keys that are not editable
/// (`isDeleted`, `createdAt`, `deletedAt`, `dueDate`, `project`,
/// `isAssigned`, …) are ignored rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
    start_date: Option<DateTime<Utc>>,
    done_date: Option<DateTime<Utc>>,
}

impl EditTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new status, validated when the edit is applied.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets a start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets a done date.
    #[must_use]
    pub const fn with_done_date(mut self, done_date: DateTime<Utc>) -> Self {
        self.done_date = Some(done_date);
        self
    }

    fn into_edit(self) -> TaskLifecycleResult<TaskEdit> {
        let status = self
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?;
        Ok(TaskEdit {
            name: self.name.map(RecordName::new).transpose()?,
            description: self.description.map(RecordDescription::new).transpose()?,
            status,
            start_date: self.start_date,
            done_date: self.done_date,
        })
    }
}

/// Query parameters for listing tasks.
///
/// Blank strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksRequest {
    name: Option<String>,
    status: Option<String>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    done_date: Option<NaiveDate>,
}

impl ListTasksRequest {
    /// Creates a request listing every active task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by case-insensitive name fragment.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by status; invalid values fail the listing.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filters by the calendar day the task was started.
    #[must_use]
    pub const fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Filters by the calendar day the task is due.
    #[must_use]
    pub const fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Filters by the calendar day the task was finished.
    #[must_use]
    pub const fn with_done_date(mut self, date: NaiveDate) -> Self {
        self.done_date = Some(date);
        self
    }

    fn into_filter(self, calendar: &Calendar) -> TaskLifecycleResult<TaskFilter> {
        let mut filter = TaskFilter::new();
        if let Some(fragment) = self.name.filter(|value| !value.trim().is_empty()) {
            filter = filter.with_name_containing(fragment);
        }
        if let Some(raw) = self.status.filter(|value| !value.trim().is_empty()) {
            filter = filter.with_status(TaskStatus::try_from(raw.as_str())?);
        }
        if let Some(date) = self.start_date {
            filter = filter.with_start_date(calendar.day_window(date)?);
        }
        if let Some(date) = self.due_date {
            filter = filter.with_due_date(calendar.day_window(date)?);
        }
        if let Some(date) = self.done_date {
            filter = filter.with_done_date(calendar.day_window(date)?);
        }
        Ok(filter)
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The status value is not one of the known statuses.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),
    /// A date filter could not be turned into a calendar window.
    #[error(transparent)]
    InvalidDate(#[from] CalendarError),
    /// The task does not exist or has been deleted.
    #[error("no task found with id {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl From<TextFieldError> for TaskLifecycleError {
    fn from(err: TextFieldError) -> Self {
        Self::Domain(TaskDomainError::from(err))
    }
}

impl TaskLifecycleError {
    /// Classifies the failure for the calling request handler.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(TaskDomainError::AlreadyDeleted(_)) | Self::NotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Domain(TaskDomainError::AlreadyAssigned { .. }) => ErrorKind::Conflict,
            Self::Domain(TaskDomainError::InvalidField(_))
            | Self::InvalidStatus(_)
            | Self::InvalidDate(_) => ErrorKind::Validation,
            Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(TaskRepositoryError::DuplicateTask(_)) => ErrorKind::Conflict,
            Self::Repository(TaskRepositoryError::Persistence(_)) => ErrorKind::Persistence,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    calendar: Calendar,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service using UTC calendar days.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            calendar: Calendar::utc(),
        }
    }

    /// Interprets date filters in `calendar` instead of UTC.
    #[must_use]
    pub const fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Creates a new task in the `available` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the name or description is
    /// blank, or [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let CreateTaskRequest {
            name,
            description,
            due_date,
        } = request;
        let task = Task::new(
            RecordName::new(name)?,
            RecordDescription::new(description)?,
            due_date,
            &*self.clock,
        );
        self.repository.store(&task).await?;
        tracing::info!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Retrieves an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task is missing or
    /// deleted.
    pub async fn get(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.load_active(id).await
    }

    /// Applies a partial update to an active task.
    ///
    /// A status of `todo` or `done` stamps the matching date with the
    /// current time, replacing any date supplied in the same request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or deleted tasks,
    /// [`TaskLifecycleError::InvalidStatus`] for unknown statuses, and
    /// [`TaskLifecycleError::Domain`] for blank text fields.
    pub async fn edit(&self, id: TaskId, request: EditTaskRequest) -> TaskLifecycleResult<Task> {
        let mut task = self.load_active(id).await?;
        let edit = request.into_edit().inspect_err(|err| {
            tracing::warn!(task_id = %id, error = %err, "task edit rejected");
        })?;
        task.apply_edit(edit, &*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, status = %task.status(), "task edited");
        Ok(task)
    }

    /// Returns an active task to `available` and clears its progress dates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or deleted tasks.
    pub async fn reset(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load_active(id).await?;
        task.reset(&*self.clock);
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, "task reset");
        Ok(task)
    }

    /// Soft-deletes an active task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for missing or already
    /// deleted tasks.
    pub async fn soft_delete(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.load_active(id).await?;
        task.soft_delete(&*self.clock)?;
        self.repository.update(&task).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(task)
    }

    /// Lists active tasks matching the request, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] when the status filter is
    /// not a known status.
    pub async fn list(&self, request: ListTasksRequest) -> TaskLifecycleResult<Vec<Task>> {
        let filter = request.into_filter(&self.calendar)?;
        let tasks = self.repository.find_many(&filter).await?;
        tracing::debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    async fn load_active(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id, DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| {
                tracing::warn!(task_id = %id, "task not found");
                TaskLifecycleError::NotFound(id)
            })
    }
}
