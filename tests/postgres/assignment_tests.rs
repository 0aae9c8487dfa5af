//! Transactional assignment against `PostgreSQL`.

use super::helpers::{TestDatabase, new_project, new_task, test_runtime};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use std::sync::Arc;
use taskboard::{
    assignment::{
        adapters::postgres::PostgresAssignmentCoordinator,
        ports::{AssignmentCoordinator, AssignmentError},
    },
    project::{adapters::postgres::PostgresProjectRepository, ports::ProjectRepository},
    shared::{DeletionScope, ErrorKind},
    task::{adapters::postgres::PostgresTaskRepository, ports::TaskRepository},
};

#[rstest]
fn assign_then_move_updates_all_records(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "assign_then_move")?;
    let tasks = PostgresTaskRepository::new(database.pool());
    let projects = PostgresProjectRepository::new(database.pool());
    let coordinator = PostgresAssignmentCoordinator::new(database.pool(), Arc::new(DefaultClock));

    test_runtime().block_on(async {
        let task = new_task("Movable");
        let source = new_project("Source");
        let target = new_project("Target");
        tasks.store(&task).await?;
        projects.store(&source).await?;
        projects.store(&target).await?;

        coordinator.assign(source.id(), task.id()).await?;
        let moved = coordinator
            .move_task(source.id(), task.id(), target.id())
            .await?;

        let stored_task = tasks
            .find_by_id(task.id(), DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| eyre::eyre!("task missing"))?;
        let stored_source = projects
            .find_by_id(source.id(), DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| eyre::eyre!("source missing"))?;
        let stored_target = projects
            .find_by_id(target.id(), DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| eyre::eyre!("target missing"))?;

        eyre::ensure!(moved.task.id() == task.id(), "returned a different task");
        eyre::ensure!(moved.next.tasks() == [task.id()], "returned target list wrong");
        eyre::ensure!(stored_task.project() == Some(target.id()), "task not relinked");
        eyre::ensure!(stored_source.tasks().is_empty(), "source still lists the task");
        eyre::ensure!(stored_target.tasks() == [task.id()], "target list wrong");
        Ok(())
    })
}

#[rstest]
fn conflicting_assign_leaves_records_unchanged(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "assign_conflict")?;
    let tasks = PostgresTaskRepository::new(database.pool());
    let projects = PostgresProjectRepository::new(database.pool());
    let coordinator = PostgresAssignmentCoordinator::new(database.pool(), Arc::new(DefaultClock));

    test_runtime().block_on(async {
        let task = new_task("Taken");
        let first = new_project("First owner");
        let second = new_project("Second owner");
        tasks.store(&task).await?;
        projects.store(&first).await?;
        projects.store(&second).await?;
        coordinator.assign(first.id(), task.id()).await?;

        let result = coordinator.assign(second.id(), task.id()).await;

        eyre::ensure!(
            result.as_ref().err().map(AssignmentError::kind) == Some(ErrorKind::Conflict),
            "expected conflict"
        );
        let stored_second = projects
            .find_by_id(second.id(), DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| eyre::eyre!("project missing"))?;
        eyre::ensure!(stored_second.tasks().is_empty(), "rejected project was written");
        Ok(())
    })
}

#[rstest]
fn assign_to_missing_project_is_not_found(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "assign_missing")?;
    let tasks = PostgresTaskRepository::new(database.pool());
    let coordinator = PostgresAssignmentCoordinator::new(database.pool(), Arc::new(DefaultClock));

    test_runtime().block_on(async {
        let task = new_task("Orphan");
        tasks.store(&task).await?;
        let missing = new_project("Never stored");

        let result = coordinator.assign(missing.id(), task.id()).await;

        eyre::ensure!(
            matches!(result, Err(AssignmentError::ProjectNotFound(id)) if id == missing.id()),
            "expected project not found"
        );
        Ok(())
    })
}

#[rstest]
fn concurrent_assign_and_move_serialize_on_project_locks(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "assign_move_race")?;
    let tasks = PostgresTaskRepository::new(database.pool());
    let projects = PostgresProjectRepository::new(database.pool());
    let coordinator = PostgresAssignmentCoordinator::new(database.pool(), Arc::new(DefaultClock));

    test_runtime().block_on(async {
        for round in 0..8 {
            let task = new_task("Contended");
            let source = new_project("Source");
            let target = new_project("Target");
            tasks.store(&task).await?;
            projects.store(&source).await?;
            projects.store(&target).await?;
            coordinator.assign(source.id(), task.id()).await?;

            let (assigned, moved) = tokio::join!(
                coordinator.assign(target.id(), task.id()),
                coordinator.move_task(source.id(), task.id(), target.id()),
            );

            eyre::ensure!(moved.is_ok(), "round {round}: move failed: {moved:?}");
            eyre::ensure!(
                assigned.as_ref().err().map(AssignmentError::kind) == Some(ErrorKind::Conflict),
                "round {round}: expected assign conflict, got {assigned:?}"
            );
            let stored_task = tasks
                .find_by_id(task.id(), DeletionScope::ActiveOnly)
                .await?
                .ok_or_else(|| eyre::eyre!("task missing"))?;
            let stored_source = projects
                .find_by_id(source.id(), DeletionScope::ActiveOnly)
                .await?
                .ok_or_else(|| eyre::eyre!("source missing"))?;
            let stored_target = projects
                .find_by_id(target.id(), DeletionScope::ActiveOnly)
                .await?
                .ok_or_else(|| eyre::eyre!("target missing"))?;
            eyre::ensure!(stored_task.project() == Some(target.id()), "task not relinked");
            eyre::ensure!(stored_source.tasks().is_empty(), "source still lists the task");
            eyre::ensure!(stored_target.tasks() == [task.id()], "target list wrong");
        }
        Ok(())
    })
}
