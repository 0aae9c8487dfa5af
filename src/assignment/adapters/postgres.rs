//! Transactional assignment coordinator for `PostgreSQL`.
//!
//! Every record is read with `SELECT ... FOR UPDATE` inside one
//! transaction, projects first in id order and the task last. Concurrent
//! assignments and moves of the same task serialize, and a failed write
//! leaves nothing behind.

use crate::{
    assignment::{
        domain::{self, Assignment, Reassignment},
        ports::{AssignmentCoordinator, AssignmentError, AssignmentResult},
    },
    database::PgPool,
    project::{
        adapters::postgres::{find_project_for_update, write_project},
        domain::{Project, ProjectId},
    },
    task::{
        adapters::postgres::{find_task_for_update, write_task},
        domain::{Task, TaskId},
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use mockable::Clock;
use std::sync::Arc;

/// Failure inside a coordinator transaction.
#[derive(Debug)]
enum TransactionError {
    Rejected(AssignmentError),
    Database(DieselError),
}

impl From<DieselError> for TransactionError {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl From<TransactionError> for AssignmentError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Rejected(inner) => inner,
            TransactionError::Database(inner) => Self::persistence(inner),
        }
    }
}

/// `PostgreSQL` assignment coordinator running each operation in a single
/// transaction.
#[derive(Clone)]
pub struct PostgresAssignmentCoordinator<C>
where
    C: Clock + Send + Sync + 'static,
{
    pool: PgPool,
    clock: Arc<C>,
}

impl<C> PostgresAssignmentCoordinator<C>
where
    C: Clock + Send + Sync + 'static,
{
    /// Creates a coordinator from a connection pool and clock.
    #[must_use]
    pub const fn new(pool: PgPool, clock: Arc<C>) -> Self {
        Self { pool, clock }
    }

    async fn run_in_transaction<F, T>(&self, f: F) -> AssignmentResult<T>
    where
        F: FnOnce(&mut PgConnection, &C) -> AssignmentResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let clock = Arc::clone(&self.clock);
        tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(AssignmentError::persistence)?;
            let connection: &mut PgConnection = &mut pooled;
            connection
                .transaction::<T, TransactionError, _>(|tx| {
                    f(tx, &*clock).map_err(TransactionError::Rejected)
                })
                .map_err(AssignmentError::from)
        })
        .await
        .map_err(AssignmentError::persistence)?
    }
}

fn lock_task(connection: &mut PgConnection, id: TaskId) -> AssignmentResult<Task> {
    find_task_for_update(connection, id)?.ok_or(AssignmentError::TaskNotFound(id))
}

/// Locks two distinct projects in ascending id order and returns them as
/// `(current, next)`.
///
/// Lock order for every operation: project rows by id, then the task row.
fn lock_project_pair(
    connection: &mut PgConnection,
    current_id: ProjectId,
    next_id: ProjectId,
) -> AssignmentResult<(Option<Project>, Option<Project>)> {
    if next_id.into_inner() < current_id.into_inner() {
        let next = find_project_for_update(connection, next_id)?;
        let current = find_project_for_update(connection, current_id)?;
        return Ok((current, next));
    }
    let current = find_project_for_update(connection, current_id)?;
    let next = find_project_for_update(connection, next_id)?;
    Ok((current, next))
}

fn lock_project(
    connection: &mut PgConnection,
    id: ProjectId,
    missing: fn(ProjectId) -> AssignmentError,
) -> AssignmentResult<Project> {
    find_project_for_update(connection, id)?.ok_or_else(|| missing(id))
}

#[async_trait]
impl<C> AssignmentCoordinator for PostgresAssignmentCoordinator<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn assign(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> AssignmentResult<Assignment> {
        let outcome = self
            .run_in_transaction(move |connection, clock| {
                let mut project =
                    lock_project(connection, project_id, AssignmentError::ProjectNotFound)?;
                let mut task = lock_task(connection, task_id)?;
                domain::assign(&mut task, &mut project, clock)?;
                write_task(connection, &task)?;
                write_project(connection, &project)?;
                Ok(Assignment { task, project })
            })
            .await;
        match &outcome {
            Ok(_) => tracing::info!(%task_id, %project_id, "task assigned"),
            Err(error) => tracing::warn!(%task_id, %project_id, %error, "assignment failed"),
        }
        outcome
    }

    async fn move_task(
        &self,
        current_project_id: ProjectId,
        task_id: TaskId,
        next_project_id: ProjectId,
    ) -> AssignmentResult<Reassignment> {
        let outcome = self
            .run_in_transaction(move |connection, clock| {
                if current_project_id == next_project_id {
                    let mut project = lock_project(
                        connection,
                        current_project_id,
                        AssignmentError::CurrentProjectNotFound,
                    )?;
                    let mut task = lock_task(connection, task_id)?;
                    if domain::reassign_within(&mut task, &mut project, clock) {
                        write_project(connection, &project)?;
                    }
                    write_task(connection, &task)?;
                    return Ok(Reassignment {
                        task,
                        previous: project.clone(),
                        next: project,
                    });
                }
                let (locked_current, locked_next) =
                    lock_project_pair(connection, current_project_id, next_project_id)?;
                let mut current = locked_current
                    .ok_or(AssignmentError::CurrentProjectNotFound(current_project_id))?;
                let mut task = lock_task(connection, task_id)?;
                let mut next =
                    locked_next.ok_or(AssignmentError::NextProjectNotFound(next_project_id))?;
                let (removed, added) = domain::reassign(&mut task, &mut current, &mut next, clock);
                if removed {
                    write_project(connection, &current)?;
                }
                if added {
                    write_project(connection, &next)?;
                }
                write_task(connection, &task)?;
                Ok(Reassignment {
                    task,
                    previous: current,
                    next,
                })
            })
            .await;
        match &outcome {
            Ok(_) => tracing::info!(
                %task_id,
                from = %current_project_id,
                to = %next_project_id,
                "task moved"
            ),
            Err(error) => tracing::warn!(%task_id, %error, "move failed"),
        }
        outcome
    }
}
