//! In-memory integration tests for assigning and moving tasks.

use super::helpers::{Board, board, tomorrow};
use rstest::rstest;
use taskboard::{
    assignment::ports::{AssignmentCoordinator, AssignmentError},
    project::{domain::Project, services::CreateProjectRequest},
    shared::ErrorKind,
    task::{
        domain::{Task, TaskStatus},
        services::{CreateTaskRequest, EditTaskRequest},
    },
};

async fn task(board: &Board, name: &str) -> eyre::Result<Task> {
    Ok(board
        .tasks
        .create(CreateTaskRequest::new(name, "Assignment flow", tomorrow()))
        .await?)
}

async fn project(board: &Board, name: &str) -> eyre::Result<Project> {
    Ok(board
        .projects
        .create(CreateProjectRequest::new(name, "Assignment flow", tomorrow()))
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assign_links_task_and_project(board: Board) -> eyre::Result<()> {
    let t1 = task(&board, "T1").await?;
    let p1 = project(&board, "P1").await?;

    board.coordinator.assign(p1.id(), t1.id()).await?;

    let stored_task = board.tasks.get(t1.id()).await?;
    let stored_project = board.projects.get(p1.id()).await?;
    eyre::ensure!(stored_task.project() == Some(p1.id()), "task not linked");
    eyre::ensure!(stored_task.is_assigned(), "task not flagged as assigned");
    eyre::ensure!(stored_project.project.tasks() == [t1.id()], "project list wrong");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_assign_conflicts_and_changes_nothing(board: Board) -> eyre::Result<()> {
    let t1 = task(&board, "T1").await?;
    let p1 = project(&board, "P1").await?;
    let p2 = project(&board, "P2").await?;
    board.coordinator.assign(p1.id(), t1.id()).await?;
    let task_before = board.tasks.get(t1.id()).await?;
    let p2_before = board.projects.get(p2.id()).await?;

    let again = board.coordinator.assign(p1.id(), t1.id()).await;
    let elsewhere = board.coordinator.assign(p2.id(), t1.id()).await;

    for result in [again, elsewhere] {
        let kind = result.err().map(|err| err.kind());
        eyre::ensure!(kind == Some(ErrorKind::Conflict), "expected conflict, got {kind:?}");
    }
    eyre::ensure!(board.tasks.get(t1.id()).await? == task_before, "task changed");
    eyre::ensure!(board.projects.get(p2.id()).await? == p2_before, "project changed");
    eyre::ensure!(
        board.projects.get(p1.id()).await?.project.tasks() == [t1.id()],
        "source project list changed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_transfers_task_reference(board: Board) -> eyre::Result<()> {
    let t1 = task(&board, "T1").await?;
    let p1 = project(&board, "P1").await?;
    let p2 = project(&board, "P2").await?;
    board.coordinator.assign(p1.id(), t1.id()).await?;

    let moved = board.coordinator.move_task(p1.id(), t1.id(), p2.id()).await?;

    eyre::ensure!(moved.previous.tasks().is_empty(), "source list not emptied");
    eyre::ensure!(
        board.projects.get(p1.id()).await?.project.tasks().is_empty(),
        "stored source list not emptied"
    );
    eyre::ensure!(
        board.projects.get(p2.id()).await?.project.tasks() == [t1.id()],
        "destination list wrong"
    );
    let stored_task = board.tasks.get(t1.id()).await?;
    eyre::ensure!(stored_task.project() == Some(p2.id()), "task not relinked");
    eyre::ensure!(stored_task.is_assigned(), "task not flagged as assigned");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_move_keeps_single_reference(board: Board) -> eyre::Result<()> {
    let t1 = task(&board, "T1").await?;
    let p1 = project(&board, "P1").await?;
    let p2 = project(&board, "P2").await?;
    board.coordinator.assign(p1.id(), t1.id()).await?;

    board.coordinator.move_task(p1.id(), t1.id(), p2.id()).await?;
    board.coordinator.move_task(p1.id(), t1.id(), p2.id()).await?;

    eyre::ensure!(
        board.projects.get(p2.id()).await?.project.tasks() == [t1.id()],
        "destination holds duplicate references"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_into_same_project_keeps_single_reference(board: Board) -> eyre::Result<()> {
    let t1 = task(&board, "T1").await?;
    let p1 = project(&board, "P1").await?;
    board.coordinator.assign(p1.id(), t1.id()).await?;

    let moved = board.coordinator.move_task(p1.id(), t1.id(), p1.id()).await?;

    eyre::ensure!(moved.next.tasks() == [t1.id()], "reference lost or duplicated");
    eyre::ensure!(
        board.projects.get(p1.id()).await?.project.tasks() == [t1.id()],
        "stored list changed"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_records_cannot_be_assigned(board: Board) -> eyre::Result<()> {
    let t1 = task(&board, "T1").await?;
    let p1 = project(&board, "P1").await?;
    board.projects.soft_delete(p1.id()).await?;

    let result = board.coordinator.assign(p1.id(), t1.id()).await;

    eyre::ensure!(
        matches!(result, Err(AssignmentError::ProjectNotFound(id)) if id == p1.id()),
        "expected project not found"
    );
    eyre::ensure!(!board.tasks.get(t1.id()).await?.is_assigned(), "task was modified");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reset_leaves_assignment_untouched(board: Board) -> eyre::Result<()> {
    let t1 = task(&board, "T1").await?;
    let p1 = project(&board, "P1").await?;
    board.coordinator.assign(p1.id(), t1.id()).await?;
    board
        .tasks
        .edit(t1.id(), EditTaskRequest::new().with_status("done"))
        .await?;

    let reset = board.tasks.reset(t1.id()).await?;

    eyre::ensure!(reset.status() == TaskStatus::Available, "status not reset");
    eyre::ensure!(reset.start_date().is_none() && reset.done_date().is_none(), "dates kept");
    eyre::ensure!(reset.project() == Some(p1.id()) && reset.is_assigned(), "assignment lost");
    Ok(())
}
