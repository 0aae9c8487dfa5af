//! In-memory integration tests for project listing with task summaries.

use super::helpers::{Board, board, tomorrow};
use chrono::TimeDelta;
use rstest::rstest;
use taskboard::{
    assignment::ports::AssignmentCoordinator,
    project::services::{CreateProjectRequest, ListProjectsRequest},
    task::services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_joins_tasks_and_hides_deleted_ones(board: Board) -> eyre::Result<()> {
    let project = board
        .projects
        .create(CreateProjectRequest::new("Roadmap", "Quarter plan", tomorrow()))
        .await?;
    let mut task_ids = Vec::new();
    for name in ["Research", "Prototype", "Rollout"] {
        let task = board
            .tasks
            .create(CreateTaskRequest::new(name, "Roadmap step", tomorrow()))
            .await?;
        board.coordinator.assign(project.id(), task.id()).await?;
        task_ids.push(task.id());
    }
    let prototype = *task_ids.get(1).ok_or_else(|| eyre::eyre!("missing task"))?;
    board.tasks.soft_delete(prototype).await?;

    let listed = board.projects.list(ListProjectsRequest::new()).await?;

    let overview = listed
        .first()
        .ok_or_else(|| eyre::eyre!("project missing from listing"))?;
    let names: Vec<_> = overview
        .task_details
        .iter()
        .map(|summary| summary.name.as_str())
        .collect();
    eyre::ensure!(names == ["Research", "Rollout"], "unexpected summaries {names:?}");
    eyre::ensure!(overview.project.tasks().len() == 3, "reference list was pruned");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_excludes_deleted_projects_and_filters_by_day(board: Board) -> eyre::Result<()> {
    let later = tomorrow() + TimeDelta::days(7);
    let kept = board
        .projects
        .create(CreateProjectRequest::new("Kept", "Still running", later))
        .await?;
    let dropped = board
        .projects
        .create(CreateProjectRequest::new("Dropped", "Cancelled", later))
        .await?;
    board
        .projects
        .create(CreateProjectRequest::new("Sooner", "Due earlier", tomorrow()))
        .await?;
    board.projects.soft_delete(dropped.id()).await?;

    let listed = board
        .projects
        .list(ListProjectsRequest::new().with_due_date(later.date_naive()))
        .await?;

    let ids: Vec<_> = listed.iter().map(|overview| overview.project.id()).collect();
    eyre::ensure!(ids == [kept.id()], "unexpected projects {ids:?}");
    Ok(())
}
