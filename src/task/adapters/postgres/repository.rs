//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::{
    database::{PgPool, contains_pattern},
    project::domain::ProjectId,
    shared::{DeletionScope, RecordDescription, RecordName, Slug},
    task::{
        domain::{PersistedTaskData, Task, TaskFilter, TaskId, TaskStatus},
        ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let snapshot = task.clone();
        self.run_blocking(move |connection| write_task(connection, &snapshot))
            .await
    }

    async fn find_by_id(
        &self,
        id: TaskId,
        scope: DeletionScope,
    ) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .into_boxed();
            if scope == DeletionScope::ActiveOnly {
                query = query.filter(tasks::is_deleted.eq(false));
            }
            let row = query
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_many(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::is_deleted.eq(false))
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(fragment) = criteria.name_contains() {
                query = query.filter(tasks::name.ilike(contains_pattern(fragment)));
            }
            if let Some(status) = criteria.status() {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(window) = criteria.start_date() {
                query = query.filter(
                    tasks::start_date
                        .ge(window.start())
                        .and(tasks::start_date.lt(window.end())),
                );
            }
            if let Some(window) = criteria.due_date() {
                query = query.filter(
                    tasks::due_date
                        .ge(window.start())
                        .and(tasks::due_date.lt(window.end())),
                );
            }
            if let Some(window) = criteria.done_date() {
                query = query.filter(
                    tasks::done_date
                        .ge(window.start())
                        .and(tasks::done_date.lt(window.end())),
                );
            }
            let rows = query
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<Task>> {
        let uuids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(uuids))
                .filter(tasks::is_deleted.eq(false))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// Loads an active task and locks its row for the rest of the transaction.
pub(crate) fn find_task_for_update(
    connection: &mut PgConnection,
    id: TaskId,
) -> TaskRepositoryResult<Option<Task>> {
    let row = tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .filter(tasks::is_deleted.eq(false))
        .select(TaskRow::as_select())
        .for_update()
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)?;
    row.map(row_to_task).transpose()
}

/// Overwrites the mutable columns of an existing task row.
pub(crate) fn write_task(connection: &mut PgConnection, task: &Task) -> TaskRepositoryResult<()> {
    let affected = diesel::update(tasks::table.filter(tasks::id.eq(task.id().into_inner())))
        .set(&to_changeset(task))
        .execute(connection)
        .map_err(TaskRepositoryError::persistence)?;
    if affected == 0 {
        return Err(TaskRepositoryError::NotFound(task.id()));
    }
    Ok(())
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        name: task.name().as_str().to_owned(),
        slug: task.slug().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        start_date: task.start_date(),
        due_date: task.due_date(),
        done_date: task.done_date(),
        project_id: task.project().map(ProjectId::into_inner),
        is_deleted: task.is_deleted(),
        deleted_at: task.deleted_at(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        name: task.name().as_str().to_owned(),
        slug: task.slug().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        start_date: task.start_date(),
        done_date: task.done_date(),
        project_id: task.project().map(ProjectId::into_inner),
        is_deleted: task.is_deleted(),
        deleted_at: task.deleted_at(),
        updated_at: task.updated_at(),
    }
}

/// Converts a persisted row back into the task aggregate.
fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name,
        slug,
        description,
        status,
        start_date,
        due_date,
        done_date,
        project_id,
        is_deleted,
        deleted_at,
        created_at,
        updated_at,
    } = row;

    debug_assert!(
        is_deleted == deleted_at.is_some(),
        "task {id} has is_deleted={is_deleted} but deleted_at={deleted_at:?}"
    );

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        name: RecordName::new(name).map_err(TaskRepositoryError::persistence)?,
        slug: Slug::from_persisted(slug),
        description: RecordDescription::new(description)
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        start_date,
        due_date,
        done_date,
        project: project_id.map(ProjectId::from_uuid),
        deleted_at,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
