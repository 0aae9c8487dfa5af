//! When steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::{assignment::ports::AssignmentCoordinator, task::services::EditTaskRequest};

#[when(r#"task "{task}" is assigned to project "{project}""#)]
fn assign_task(
    world: &mut AssignmentWorld,
    task: String,
    project: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    let project_id = world.project_id(&project)?;
    world.last_assignment = Some(run_async(world.coordinator.assign(project_id, task_id)));
    Ok(())
}

#[when(r#"task "{task}" is moved from project "{current}" to project "{next}""#)]
fn move_task(
    world: &mut AssignmentWorld,
    task: String,
    current: String,
    next: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    let current_id = world.project_id(&current)?;
    let next_id = world.project_id(&next)?;
    world.last_move = Some(run_async(
        world.coordinator.move_task(current_id, task_id, next_id),
    ));
    Ok(())
}

#[when(r#"task "{task}" is edited with status "{status}""#)]
fn edit_status(
    world: &mut AssignmentWorld,
    task: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    let started = Utc::now();
    run_async(
        world
            .tasks
            .edit(task_id, EditTaskRequest::new().with_status(status)),
    )
    .wrap_err("edit task status")?;
    world.edit_window = Some((started, Utc::now()));
    Ok(())
}

#[when(r#"task "{task}" is reset"#)]
fn reset_task(world: &mut AssignmentWorld, task: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    run_async(world.tasks.reset(task_id)).wrap_err("reset task")?;
    Ok(())
}
