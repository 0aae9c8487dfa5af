//! Service layer for project creation, editing, deletion, and listing.

use crate::{
    project::{
        domain::{
            Project, ProjectDomainError, ProjectEdit, ProjectFilter, ProjectId, ProjectOverview,
        },
        ports::{ProjectRepository, ProjectRepositoryError},
    },
    shared::{
        Calendar, CalendarError, DeletionScope, ErrorKind, RecordDescription, RecordName,
        TextFieldError,
    },
    task::ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: String,
    start_date: Option<DateTime<Utc>>,
    due_date: DateTime<Utc>,
}

impl CreateProjectRequest {
    /// Creates a request with every required project field.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start_date: None,
            due_date,
        }
    }

    /// Sets the planned start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Partial update of a project.
///
/// Only `name`, `description`, and `startDate` are read; `dueDate`,
/// `isDeleted`, `createdAt`, `deletedAt`, and `tasks` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditProjectRequest {
    name: Option<String>,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
}

impl EditProjectRequest {
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

    /// Sets a new start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    fn into_edit(self) -> Result<ProjectEdit, TextFieldError> {
        Ok(ProjectEdit {
            name: self.name.map(RecordName::new).transpose()?,
            description: self.description.map(RecordDescription::new).transpose()?,
            start_date: self.start_date,
        })
    }
}

/// Query parameters for listing projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsRequest {
    name: Option<String>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
}

impl ListProjectsRequest {
    /// Creates a request listing every active project.
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

    /// Filters by the calendar day the project starts.
    #[must_use]
    pub const fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Filters by the calendar day the project is due.
    #[must_use]
    pub const fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    fn into_filter(self, calendar: &Calendar) -> Result<ProjectFilter, CalendarError> {
        let mut filter = ProjectFilter::new();
        if let Some(fragment) = self.name.filter(|value| !value.trim().is_empty()) {
            filter = filter.with_name_containing(fragment);
        }
        if let Some(date) = self.start_date {
            filter = filter.with_start_date(calendar.day_window(date)?);
        }
        if let Some(date) = self.due_date {
            filter = filter.with_due_date(calendar.day_window(date)?);
        }
        Ok(filter)
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// A date filter could not be turned into a calendar window.
    #[error(transparent)]
    InvalidDate(#[from] CalendarError),
    /// The project does not exist or has been deleted.
    #[error("no project found with id {0}")]
    NotFound(ProjectId),
    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Joining referenced tasks failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

impl From<TextFieldError> for ProjectServiceError {
    fn from(err: TextFieldError) -> Self {
        Self::Domain(ProjectDomainError::from(err))
    }
}

impl ProjectServiceError {
    /// Classifies the failure for the calling request handler.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(ProjectDomainError::InvalidField(_)) | Self::InvalidDate(_) => {
                ErrorKind::Validation
            }
            Self::Domain(ProjectDomainError::AlreadyDeleted(_))
            | Self::NotFound(_)
            | Self::Repository(ProjectRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Repository(ProjectRepositoryError::DuplicateProject(_)) => ErrorKind::Conflict,
            Self::Repository(ProjectRepositoryError::Persistence(_)) | Self::TaskRepository(_) => {
                ErrorKind::Persistence
            }
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
    calendar: Calendar,
}

impl<P, T, C> ProjectService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service using UTC calendar days.
    #[must_use]
    pub fn new(projects: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
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

    /// Creates a project with an empty task list.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] when the name or description
    /// is blank, or [`ProjectServiceError::Repository`] when persistence
    /// fails.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectServiceResult<Project> {
        let CreateProjectRequest {
            name,
            description,
            start_date,
            due_date,
        } = request;
        let project = Project::new(
            RecordName::new(name)?,
            RecordDescription::new(description)?,
            start_date,
            due_date,
            &*self.clock,
        );
        self.projects.store(&project).await?;
        tracing::info!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Retrieves an active project with its tasks joined.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project is missing
    /// or deleted.
    pub async fn get(&self, id: ProjectId) -> ProjectServiceResult<ProjectOverview> {
        let project = self.load_active(id).await?;
        let tasks = self.tasks.find_by_ids(project.tasks()).await?;
        Ok(ProjectOverview::assemble(project, &tasks))
    }

    /// Applies a whitelisted partial update to an active project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] for missing or deleted
    /// projects and [`ProjectServiceError::Domain`] for blank text fields.
    pub async fn edit(
        &self,
        id: ProjectId,
        request: EditProjectRequest,
    ) -> ProjectServiceResult<Project> {
        let mut project = self.load_active(id).await?;
        let edit = request.into_edit()?;
        project.apply_edit(edit, &*self.clock);
        self.projects.update(&project).await?;
        tracing::info!(project_id = %id, "project edited");
        Ok(project)
    }

    /// Soft-deletes an active project.
    ///
    /// Tasks referencing the project keep their assignment.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] for missing or already
    /// deleted projects.
    pub async fn soft_delete(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        let mut project = self.load_active(id).await?;
        project.soft_delete(&*self.clock)?;
        self.projects.update(&project).await?;
        tracing::info!(project_id = %id, "project deleted");
        Ok(project)
    }

    /// Lists active projects matching the request, each with its active
    /// tasks joined in list order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::InvalidDate`] when a date filter is out
    /// of range, or a repository error when a lookup fails.
    pub async fn list(
        &self,
        request: ListProjectsRequest,
    ) -> ProjectServiceResult<Vec<ProjectOverview>> {
        let filter = request.into_filter(&self.calendar)?;
        let projects = self.projects.find_many(&filter).await?;
        let referenced: Vec<_> = projects
            .iter()
            .flat_map(|project| project.tasks().iter().copied())
            .collect();
        let tasks = self.tasks.find_by_ids(&referenced).await?;
        tracing::debug!(count = projects.len(), "projects listed");
        Ok(projects
            .into_iter()
            .map(|project| ProjectOverview::assemble(project, &tasks))
            .collect())
    }

    async fn load_active(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.projects
            .find_by_id(id, DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| {
                tracing::warn!(project_id = %id, "project not found");
                ProjectServiceError::NotFound(id)
            })
    }
}
