//! Error types for project domain validation.

use super::ProjectId;
use crate::shared::TextFieldError;
use thiserror::Error;

/// Errors returned while constructing or mutating projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// A required text field was blank.
    #[error(transparent)]
    InvalidField(#[from] TextFieldError),

    /// The project has already been soft-deleted.
    #[error("project {0} has already been deleted")]
    AlreadyDeleted(ProjectId),
}
