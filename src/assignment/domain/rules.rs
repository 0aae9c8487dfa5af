//! Mutations applied to the task and project records of an assignment.
//!
//! These functions only change in-memory aggregates; persisting the
//! result is the coordinator's job.

use crate::{
    project::domain::Project,
    task::domain::{Task, TaskDomainError},
};
use mockable::Clock;

/// Assigns `task` to `project` and appends the task reference.
///
/// The project list is not checked for an existing reference.
///
/// # Errors
///
/// Returns [`TaskDomainError::AlreadyAssigned`] when the task already
/// belongs to a project. Neither record is changed in that case.
pub fn assign(
    task: &mut Task,
    project: &mut Project,
    clock: &impl Clock,
) -> Result<(), TaskDomainError> {
    task.assign_to(project.id(), clock)?;
    project.append_task(task.id(), clock);
    Ok(())
}

/// Moves `task` from `current` to `next`.
///
/// Removing a task `current` does not list is a no-op, and `next` gains
/// the reference only if it lacks it. Returns which of the two project
/// lists changed, as `(current_changed, next_changed)`.
#[must_use = "unchanged project lists need not be written"]
pub fn reassign(
    task: &mut Task,
    current: &mut Project,
    next: &mut Project,
    clock: &impl Clock,
) -> (bool, bool) {
    let removed = current.remove_task(task.id(), clock);
    let added = next.include_task(task.id(), clock);
    task.move_to(next.id(), clock);
    (removed, added)
}

/// Moves `task` to the project it is already being moved from.
///
/// The project ends up listing the task exactly as before, plus the
/// reference if it was missing. Returns `true` when the list changed.
#[must_use = "an unchanged project list need not be written"]
pub fn reassign_within(task: &mut Task, project: &mut Project, clock: &impl Clock) -> bool {
    let added = project.include_task(task.id(), clock);
    task.move_to(project.id(), clock);
    added
}
