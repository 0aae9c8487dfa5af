//! Error types for task domain validation and parsing.

use super::TaskId;
use crate::{project::domain::ProjectId, shared::TextFieldError};
use thiserror::Error;

/// Errors returned while constructing or mutating task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required text field was blank.
    #[error(transparent)]
    InvalidField(#[from] TextFieldError),

    /// The task has already been soft-deleted.
    #[error("task {0} has already been deleted")]
    AlreadyDeleted(TaskId),

    /// The task already belongs to a project.
    #[error("task {task_id} is already assigned to project {project_id}")]
    AlreadyAssigned {
        /// Task that was targeted.
        task_id: TaskId,
        /// Project the task currently belongs to.
        project_id: ProjectId,
    },
}

/// Error returned while parsing task statuses from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task status '{0}', expected one of available, todo, done")]
pub struct ParseTaskStatusError(pub String);
