//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Board, board, today, tomorrow};
use chrono::TimeDelta;
use rstest::rstest;
use taskboard::{
    shared::ErrorKind,
    task::{
        domain::TaskStatus,
        services::{CreateTaskRequest, EditTaskRequest, ListTasksRequest},
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_returns_active_tasks_oldest_first(board: Board) -> eyre::Result<()> {
    let mut created = Vec::new();
    for name in ["Charlie", "Alpha", "Bravo"] {
        created.push(
            board
                .tasks
                .create(CreateTaskRequest::new(name, "Ordered", tomorrow()))
                .await?,
        );
    }
    let removed = created.get(1).ok_or_else(|| eyre::eyre!("missing task"))?;
    board.tasks.soft_delete(removed.id()).await?;

    let listed = board.tasks.list(ListTasksRequest::new()).await?;

    let names: Vec<_> = listed.iter().map(|task| task.name().as_str()).collect();
    eyre::ensure!(names == ["Charlie", "Bravo"], "unexpected order {names:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn todo_edit_overrides_caller_start_date(board: Board) -> eyre::Result<()> {
    let task = board
        .tasks
        .create(CreateTaskRequest::new("Plan sprint", "Backlog grooming", tomorrow()))
        .await?;
    let supplied = today() - TimeDelta::days(30);
    let edit_time = board.clock.peek();

    let edited = board
        .tasks
        .edit(
            task.id(),
            EditTaskRequest::new()
                .with_status("todo")
                .with_start_date(supplied),
        )
        .await?;

    eyre::ensure!(edited.status() == TaskStatus::Todo, "status not updated");
    eyre::ensure!(
        edited.start_date() == Some(edit_time),
        "start date {:?} is not the edit time {edit_time}",
        edited.start_date()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn done_edit_stamps_done_date(board: Board) -> eyre::Result<()> {
    let task = board
        .tasks
        .create(CreateTaskRequest::new("Ship", "Release", tomorrow()))
        .await?;
    let edit_time = board.clock.peek();

    let edited = board
        .tasks
        .edit(task.id(), EditTaskRequest::new().with_status("done"))
        .await?;

    eyre::ensure!(edited.status() == TaskStatus::Done, "status not updated");
    eyre::ensure!(edited.done_date() == Some(edit_time), "done date not stamped");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_rejects_further_edits(board: Board) -> eyre::Result<()> {
    let task = board
        .tasks
        .create(CreateTaskRequest::new("Cleanup", "Remove old data", tomorrow()))
        .await?;
    board.tasks.soft_delete(task.id()).await?;

    let edit = board
        .tasks
        .edit(task.id(), EditTaskRequest::new().with_name("Revived"))
        .await;
    let reset = board.tasks.reset(task.id()).await;
    let lookup = board.tasks.get(task.id()).await;

    for result in [edit, reset, lookup] {
        let kind = result.err().map(|err| err.kind());
        eyre::ensure!(kind == Some(ErrorKind::NotFound), "expected not found, got {kind:?}");
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_by_name_is_case_insensitive(board: Board) -> eyre::Result<()> {
    board
        .tasks
        .create(CreateTaskRequest::new("Update README", "Docs", tomorrow()))
        .await?;
    board
        .tasks
        .create(CreateTaskRequest::new("Fix login", "Bug", tomorrow()))
        .await?;

    let listed = board
        .tasks
        .list(ListTasksRequest::new().with_name("readme"))
        .await?;

    eyre::ensure!(listed.len() == 1, "expected one match, found {}", listed.len());
    Ok(())
}
