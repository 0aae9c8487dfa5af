//! Given steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async, tomorrow};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::{
    assignment::ports::AssignmentCoordinator,
    project::services::CreateProjectRequest,
    task::services::{CreateTaskRequest, EditTaskRequest},
};

#[given(r#"a task named "{name}" due tomorrow"#)]
fn task_due_tomorrow(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let request = CreateTaskRequest::new(name.clone(), "Scenario task", tomorrow());
    let task = run_async(world.tasks.create(request)).wrap_err("create scenario task")?;
    world.task_ids.insert(name, task.id());
    Ok(())
}

#[given(r#"a project named "{name}" due tomorrow"#)]
fn project_due_tomorrow(world: &mut AssignmentWorld, name: String) -> Result<(), eyre::Report> {
    let request = CreateProjectRequest::new(name.clone(), "Scenario project", tomorrow());
    let project = run_async(world.projects.create(request)).wrap_err("create scenario project")?;
    world.project_ids.insert(name, project.id());
    Ok(())
}

#[given(r#"task "{task}" has been assigned to project "{project}""#)]
fn task_has_been_assigned(
    world: &mut AssignmentWorld,
    task: String,
    project: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    let project_id = world.project_id(&project)?;
    run_async(world.coordinator.assign(project_id, task_id)).wrap_err("assign scenario task")?;
    Ok(())
}

#[given(r#"task "{task}" has been edited with status "{status}""#)]
fn task_has_been_edited(
    world: &mut AssignmentWorld,
    task: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&task)?;
    run_async(
        world
            .tasks
            .edit(task_id, EditTaskRequest::new().with_status(status)),
    )
    .wrap_err("edit scenario task")?;
    Ok(())
}

#[given(r#"project "{project}" has been deleted"#)]
fn project_has_been_deleted(
    world: &mut AssignmentWorld,
    project: String,
) -> Result<(), eyre::Report> {
    let project_id = world.project_id(&project)?;
    run_async(world.projects.soft_delete(project_id)).wrap_err("delete scenario project")?;
    Ok(())
}
