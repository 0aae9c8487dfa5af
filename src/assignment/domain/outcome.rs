//! Records produced by assignment operations.

use crate::{project::domain::Project, task::domain::Task};
use serde::Serialize;

/// Result of assigning a task to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// The task after assignment.
    pub task: Task,
    /// The project after the task reference was appended.
    pub project: Project,
}

/// Result of moving a task between projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reassignment {
    /// The task after the move.
    pub task: Task,
    /// The project the task was moved out of.
    pub previous: Project,
    /// The project the task now belongs to.
    pub next: Project,
}
