//! Coordinator port for assigning and moving tasks between projects.

use crate::{
    assignment::domain::{Assignment, Reassignment},
    project::{domain::ProjectId, ports::ProjectRepositoryError},
    shared::ErrorKind,
    task::{
        domain::{TaskDomainError, TaskId},
        ports::TaskRepositoryError,
    },
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment operations.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Coordinates changes that span a task and its projects.
#[async_trait]
pub trait AssignmentCoordinator: Send + Sync {
    /// Assigns an unassigned task to a project.
    ///
    /// The task records the project and the project appends the task to its
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError::ProjectNotFound`] or
    /// [`AssignmentError::TaskNotFound`] when either record is missing or
    /// deleted, and a [`TaskDomainError::AlreadyAssigned`] domain error when
    /// the task already belongs to a project.
    async fn assign(&self, project_id: ProjectId, task_id: TaskId)
    -> AssignmentResult<Assignment>;

    /// Moves a task from `current_project_id` to `next_project_id`.
    ///
    /// The task does not need to be listed by the current project.
    ///
    /// # Errors
    ///
    /// Returns a not-found error naming whichever of the three records is
    /// missing or deleted.
    async fn move_task(
        &self,
        current_project_id: ProjectId,
        task_id: TaskId,
        next_project_id: ProjectId,
    ) -> AssignmentResult<Reassignment>;
}

/// Reference to a record touched by an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordRef {
    /// A task record.
    Task(TaskId),
    /// A project record.
    Project(ProjectId),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Task(id) => write!(f, "task {id}"),
            Self::Project(id) => write!(f, "project {id}"),
        }
    }
}

/// Errors returned by assignment coordinators.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// The target project of an assignment is missing or deleted.
    #[error("no project found with id {0}")]
    ProjectNotFound(ProjectId),

    /// The project a task is moved out of is missing or deleted.
    #[error("no current project found with id {0}")]
    CurrentProjectNotFound(ProjectId),

    /// The project a task is moved into is missing or deleted.
    #[error("no next project found with id {0}")]
    NextProjectNotFound(ProjectId),

    /// The task is missing or deleted.
    #[error("no task found with id {0}")]
    TaskNotFound(TaskId),

    /// A task rule rejected the change.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),

    /// Project repository operation failed.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),

    /// The store or transaction machinery failed.
    #[error("assignment persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),

    /// A write failed and some earlier writes could not be undone.
    #[error("records left inconsistent ({}): {source}", format_records(.records))]
    Inconsistent {
        /// Records still holding the partially applied change.
        records: Vec<RecordRef>,
        /// The write failure that started the rollback.
        source: Box<AssignmentError>,
    },
}

impl AssignmentError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Classifies the failure for the calling request handler.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound(_)
            | Self::CurrentProjectNotFound(_)
            | Self::NextProjectNotFound(_)
            | Self::TaskNotFound(_)
            | Self::Domain(TaskDomainError::AlreadyDeleted(_))
            | Self::TaskRepository(TaskRepositoryError::NotFound(_))
            | Self::ProjectRepository(ProjectRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::Domain(TaskDomainError::AlreadyAssigned { .. }) => ErrorKind::Conflict,
            Self::Domain(TaskDomainError::InvalidField(_)) => ErrorKind::Validation,
            Self::TaskRepository(_)
            | Self::ProjectRepository(_)
            | Self::Persistence(_)
            | Self::Inconsistent { .. } => ErrorKind::Persistence,
        }
    }
}

fn format_records(records: &[RecordRef]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
