//! Coordinator that writes records one at a time through the repository
//! ports and undoes earlier writes when a later one fails.

use crate::{
    assignment::{
        domain::{self, Assignment, Reassignment},
        ports::{AssignmentCoordinator, AssignmentError, AssignmentResult, RecordRef},
    },
    project::{
        domain::{Project, ProjectId},
        ports::ProjectRepository,
    },
    shared::DeletionScope,
    task::{
        domain::{Task, TaskId},
        ports::TaskRepository,
    },
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;

/// Record state captured before and after an assignment change.
#[derive(Debug, Clone)]
enum Record {
    Task(Task),
    Project(Project),
}

impl Record {
    const fn reference(&self) -> RecordRef {
        match self {
            Self::Task(task) => RecordRef::Task(task.id()),
            Self::Project(project) => RecordRef::Project(project.id()),
        }
    }
}

#[derive(Debug)]
struct PendingWrite {
    updated: Record,
    original: Record,
}

impl PendingWrite {
    fn task(updated: &Task, original: Task) -> Self {
        Self {
            updated: Record::Task(updated.clone()),
            original: Record::Task(original),
        }
    }

    fn project(updated: &Project, original: Project) -> Self {
        Self {
            updated: Record::Project(updated.clone()),
            original: Record::Project(original),
        }
    }
}

/// Assignment coordinator built on the task and project repository ports.
///
/// Writes are issued in order without holding a lock across them, so two
/// concurrent operations on the same records can interleave. When a write
/// fails, records already written are restored to their loaded state; if a
/// restore also fails the operation reports
/// [`AssignmentError::Inconsistent`].
#[derive(Clone)]
pub struct SequentialAssignmentCoordinator<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<T, P, C> SequentialAssignmentCoordinator<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a coordinator over the given repositories.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }

    async fn load_task(&self, id: TaskId) -> AssignmentResult<Task> {
        self.tasks
            .find_by_id(id, DeletionScope::ActiveOnly)
            .await?
            .ok_or(AssignmentError::TaskNotFound(id))
    }

    async fn load_project(
        &self,
        id: ProjectId,
        missing: fn(ProjectId) -> AssignmentError,
    ) -> AssignmentResult<Project> {
        self.projects
            .find_by_id(id, DeletionScope::ActiveOnly)
            .await?
            .ok_or_else(|| missing(id))
    }

    async fn write(&self, record: &Record) -> AssignmentResult<()> {
        match record {
            Record::Task(task) => self.tasks.update(task).await?,
            Record::Project(project) => self.projects.update(project).await?,
        }
        Ok(())
    }

    async fn commit(&self, writes: &[PendingWrite]) -> AssignmentResult<()> {
        for (index, pending) in writes.iter().enumerate() {
            if let Err(err) = self.write(&pending.updated).await {
                let written = writes.get(..index).unwrap_or_default();
                return Err(self.roll_back(written, err).await);
            }
        }
        Ok(())
    }

    async fn roll_back(&self, written: &[PendingWrite], cause: AssignmentError) -> AssignmentError {
        let mut unrestored = Vec::new();
        for pending in written.iter().rev() {
            let record = pending.original.reference();
            if let Err(error) = self.write(&pending.original).await {
                tracing::error!(%error, %record, "failed to restore record after write failure");
                unrestored.push(record);
            }
        }
        if unrestored.is_empty() {
            tracing::warn!(error = %cause, "assignment rolled back after write failure");
            return cause;
        }
        AssignmentError::Inconsistent {
            records: unrestored,
            source: Box::new(cause),
        }
    }
}

#[async_trait]
impl<T, P, C> AssignmentCoordinator for SequentialAssignmentCoordinator<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    async fn assign(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> AssignmentResult<Assignment> {
        let mut project = self
            .load_project(project_id, AssignmentError::ProjectNotFound)
            .await?;
        let mut task = self.load_task(task_id).await?;
        let original_task = task.clone();
        let original_project = project.clone();

        if let Err(err) = domain::assign(&mut task, &mut project, &*self.clock) {
            tracing::warn!(%task_id, %project_id, error = %err, "assignment rejected");
            return Err(err.into());
        }

        self.commit(&[
            PendingWrite::task(&task, original_task),
            PendingWrite::project(&project, original_project),
        ])
        .await?;
        tracing::info!(%task_id, %project_id, "task assigned");
        Ok(Assignment { task, project })
    }

    async fn move_task(
        &self,
        current_project_id: ProjectId,
        task_id: TaskId,
        next_project_id: ProjectId,
    ) -> AssignmentResult<Reassignment> {
        let mut current = self
            .load_project(current_project_id, AssignmentError::CurrentProjectNotFound)
            .await?;
        let mut task = self.load_task(task_id).await?;
        let mut next = self
            .load_project(next_project_id, AssignmentError::NextProjectNotFound)
            .await?;
        let original_task = task.clone();
        let mut writes = Vec::with_capacity(3);

        if current_project_id == next_project_id {
            let original = next.clone();
            if domain::reassign_within(&mut task, &mut next, &*self.clock) {
                writes.push(PendingWrite::project(&next, original));
            }
            current = next.clone();
        } else {
            let (original_current, original_next) = (current.clone(), next.clone());
            let (removed, added) =
                domain::reassign(&mut task, &mut current, &mut next, &*self.clock);
            if removed {
                writes.push(PendingWrite::project(&current, original_current));
            }
            if added {
                writes.push(PendingWrite::project(&next, original_next));
            }
        }
        writes.push(PendingWrite::task(&task, original_task));

        self.commit(&writes).await?;
        tracing::info!(
            %task_id,
            from = %current_project_id,
            to = %next_project_id,
            "task moved"
        );
        Ok(Reassignment {
            task,
            previous: current,
            next,
        })
    }
}
