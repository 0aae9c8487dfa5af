//! Repository round trips against `PostgreSQL`.

use super::helpers::{TestDatabase, new_project, new_task, test_runtime};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use taskboard::{
    project::{
        adapters::postgres::PostgresProjectRepository, domain::ProjectFilter,
        ports::ProjectRepository,
    },
    shared::DeletionScope,
    task::{
        adapters::postgres::PostgresTaskRepository,
        domain::{TaskEdit, TaskFilter, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError},
    },
};

#[rstest]
fn task_round_trips_through_store_and_update(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "task_round_trip")?;
    let repository = PostgresTaskRepository::new(database.pool());

    test_runtime().block_on(async {
        let mut task = new_task("Round trip");
        repository.store(&task).await?;
        task.apply_edit(
            TaskEdit {
                status: Some(TaskStatus::Todo),
                ..TaskEdit::default()
            },
            &DefaultClock,
        );
        repository.update(&task).await?;

        let loaded = repository
            .find_by_id(task.id(), DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| eyre::eyre!("stored task missing"))?;

        eyre::ensure!(loaded.status() == TaskStatus::Todo, "status not persisted");
        eyre::ensure!(loaded.start_date().is_some(), "start date not persisted");
        eyre::ensure!(loaded.slug() == task.slug(), "slug not persisted");
        eyre::ensure!(!loaded.is_assigned(), "task unexpectedly assigned");
        Ok(())
    })
}

#[rstest]
fn duplicate_task_identifier_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "task_duplicate")?;
    let repository = PostgresTaskRepository::new(database.pool());

    test_runtime().block_on(async {
        let task = new_task("Duplicate");
        repository.store(&task).await?;

        let result = repository.store(&task).await;

        eyre::ensure!(
            matches!(result, Err(TaskRepositoryError::DuplicateTask(id)) if id == task.id()),
            "expected duplicate error"
        );
        Ok(())
    })
}

#[rstest]
fn deleted_task_is_only_visible_with_deleted_scope(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "task_deleted")?;
    let repository = PostgresTaskRepository::new(database.pool());

    test_runtime().block_on(async {
        let mut task = new_task("Deleted");
        repository.store(&task).await?;
        task.soft_delete(&DefaultClock)?;
        repository.update(&task).await?;

        let active = repository
            .find_by_id(task.id(), DeletionScope::ActiveOnly)
            .await?;
        let any = repository
            .find_by_id(task.id(), DeletionScope::IncludeDeleted)
            .await?;
        let joined = repository.find_by_ids(&[task.id()]).await?;
        let listed = repository.find_many(&TaskFilter::new()).await?;

        eyre::ensure!(active.is_none(), "deleted task visible in active scope");
        eyre::ensure!(any.is_some_and(|found| found.is_deleted()), "deleted task lost");
        eyre::ensure!(joined.is_empty(), "deleted task joined");
        eyre::ensure!(listed.is_empty(), "deleted task listed");
        Ok(())
    })
}

#[rstest]
fn name_filter_is_case_insensitive_literal_substring(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "task_name_filter")?;
    let repository = PostgresTaskRepository::new(database.pool());

    test_runtime().block_on(async {
        let literal = new_task("Coverage 100% done_ok");
        let other = new_task("Coverage 1000 doneXok");
        repository.store(&literal).await?;
        repository.store(&other).await?;

        let exact = repository
            .find_many(&TaskFilter::new().with_name_containing("100% DONE_"))
            .await?;

        let ids: Vec<_> = exact.iter().map(|task| task.id()).collect();
        eyre::ensure!(ids == [literal.id()], "wildcards were not escaped: {ids:?}");
        Ok(())
    })
}

#[rstest]
fn project_task_list_keeps_order_and_duplicates(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let database = TestDatabase::create(shared_test_cluster, "project_task_list")?;
    let tasks = PostgresTaskRepository::new(database.pool());
    let projects = PostgresProjectRepository::new(database.pool());

    test_runtime().block_on(async {
        let first = new_task("First");
        let second = new_task("Second");
        tasks.store(&first).await?;
        tasks.store(&second).await?;
        let mut project = new_project("Ordered");
        projects.store(&project).await?;
        for id in [second.id(), first.id(), second.id()] {
            project.append_task(id, &DefaultClock);
        }
        projects.update(&project).await?;

        let loaded = projects
            .find_by_id(project.id(), DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| eyre::eyre!("stored project missing"))?;
        let listed = projects
            .find_many(&ProjectFilter::new().with_name_containing("order"))
            .await?;

        eyre::ensure!(
            loaded.tasks() == [second.id(), first.id(), second.id()],
            "task list changed in storage"
        );
        eyre::ensure!(listed.len() == 1, "expected one listed project");
        Ok(())
    })
}
