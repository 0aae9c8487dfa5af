//! Command dispatch over the `PostgreSQL`-backed services.

use crate::cli::{
    Command, ProjectCommand, ProjectEditArgs, ProjectListArgs, TaskCommand, TaskEditArgs,
    TaskListArgs,
};
use crate::output::{Failure, Outcome};
use mockable::DefaultClock;
use serde::Serialize;
use std::sync::Arc;
use taskboard::{
    assignment::{
        adapters::postgres::PostgresAssignmentCoordinator,
        ports::{AssignmentCoordinator, AssignmentError},
    },
    database::{self, PgPool},
    project::{
        adapters::postgres::PostgresProjectRepository,
        services::{
            CreateProjectRequest, EditProjectRequest, ListProjectsRequest, ProjectService,
            ProjectServiceError,
        },
    },
    shared::{Calendar, ErrorKind},
    task::{
        adapters::postgres::PostgresTaskRepository,
        services::{
            CreateTaskRequest, EditTaskRequest, ListTasksRequest, TaskLifecycleError,
            TaskLifecycleService,
        },
    },
};

impl From<TaskLifecycleError> for Failure {
    fn from(err: TaskLifecycleError) -> Self {
        Self::new(err.kind(), err)
    }
}

impl From<ProjectServiceError> for Failure {
    fn from(err: ProjectServiceError) -> Self {
        Self::new(err.kind(), err)
    }
}

impl From<AssignmentError> for Failure {
    fn from(err: AssignmentError) -> Self {
        Self::new(err.kind(), err)
    }
}

fn to_data(value: &impl Serialize) -> Outcome {
    serde_json::to_value(value).map_err(|err| Failure::new(ErrorKind::Persistence, err))
}

fn parse_patch<T>(patch: Option<&str>) -> Result<T, Failure>
where
    T: Default + serde::de::DeserializeOwned,
{
    patch.map_or_else(
        || Ok(T::default()),
        |raw| {
            serde_json::from_str(raw).map_err(|err| {
                Failure::new(ErrorKind::Validation, format!("invalid patch: {err}"))
            })
        },
    )
}

/// Services wired to one connection pool.
pub struct App {
    pool: PgPool,
    tasks: TaskLifecycleService<PostgresTaskRepository, DefaultClock>,
    projects: ProjectService<PostgresProjectRepository, PostgresTaskRepository, DefaultClock>,
    coordinator: PostgresAssignmentCoordinator<DefaultClock>,
}

impl App {
    pub fn new(pool: PgPool, calendar: Calendar) -> Self {
        let clock = Arc::new(DefaultClock);
        let task_repository = Arc::new(PostgresTaskRepository::new(pool.clone()));
        let project_repository = Arc::new(PostgresProjectRepository::new(pool.clone()));
        Self {
            tasks: TaskLifecycleService::new(Arc::clone(&task_repository), Arc::clone(&clock))
                .with_calendar(calendar),
            projects: ProjectService::new(project_repository, task_repository, Arc::clone(&clock))
                .with_calendar(calendar),
            coordinator: PostgresAssignmentCoordinator::new(pool.clone(), clock),
            pool,
        }
    }

    pub async fn dispatch(&self, command: Command) -> Outcome {
        match command {
            Command::Migrate => self.migrate().await,
            Command::Task { action } => self.task(action).await,
            Command::Project { action } => self.project(action).await,
        }
    }

    async fn migrate(&self) -> Outcome {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || database::apply_migrations(&pool))
            .await
            .map_err(|err| Failure::new(ErrorKind::Persistence, err))?
            .map_err(|err| Failure::new(ErrorKind::Persistence, err))?;
        Ok(serde_json::json!({ "migrated": true }))
    }

    async fn task(&self, action: TaskCommand) -> Outcome {
        match action {
            TaskCommand::Create {
                name,
                description,
                due_date,
            } => to_data(
                &self
                    .tasks
                    .create(CreateTaskRequest::new(name, description, due_date))
                    .await?,
            ),
            TaskCommand::List(args) => to_data(&self.tasks.list(task_list_request(args)).await?),
            TaskCommand::Get { id } => to_data(&self.tasks.get(id).await?),
            TaskCommand::Edit { id, changes } => {
                let request = task_edit_request(changes)?;
                to_data(&self.tasks.edit(id, request).await?)
            }
            TaskCommand::Reset { id } => to_data(&self.tasks.reset(id).await?),
            TaskCommand::Delete { id } => to_data(&self.tasks.soft_delete(id).await?),
        }
    }

    async fn project(&self, action: ProjectCommand) -> Outcome {
        match action {
            ProjectCommand::Create {
                name,
                description,
                start_date,
                due_date,
            } => {
                let mut request = CreateProjectRequest::new(name, description, due_date);
                if let Some(start) = start_date {
                    request = request.with_start_date(start);
                }
                to_data(&self.projects.create(request).await?)
            }
            ProjectCommand::List(args) => {
                to_data(&self.projects.list(project_list_request(args)).await?)
            }
            ProjectCommand::Get { id } => to_data(&self.projects.get(id).await?),
            ProjectCommand::Edit { id, changes } => {
                let request = project_edit_request(changes)?;
                to_data(&self.projects.edit(id, request).await?)
            }
            ProjectCommand::Delete { id } => to_data(&self.projects.soft_delete(id).await?),
            ProjectCommand::Assign {
                project_id,
                task_id,
            } => to_data(&self.coordinator.assign(project_id, task_id).await?),
            ProjectCommand::Move {
                current_project_id,
                task_id,
                next_project_id,
            } => to_data(
                &self
                    .coordinator
                    .move_task(current_project_id, task_id, next_project_id)
                    .await?,
            ),
        }
    }
}

pub fn task_list_request(args: TaskListArgs) -> ListTasksRequest {
    let TaskListArgs {
        name,
        status,
        start_date,
        due_date,
        done_date,
    } = args;
    let mut request = ListTasksRequest::new();
    if let Some(fragment) = name {
        request = request.with_name(fragment);
    }
    if let Some(value) = status {
        request = request.with_status(value);
    }
    if let Some(date) = start_date {
        request = request.with_start_date(date);
    }
    if let Some(date) = due_date {
        request = request.with_due_date(date);
    }
    if let Some(date) = done_date {
        request = request.with_done_date(date);
    }
    request
}

pub fn task_edit_request(args: TaskEditArgs) -> Result<EditTaskRequest, Failure> {
    let TaskEditArgs {
        patch,
        name,
        description,
        status,
        start_date,
        done_date,
    } = args;
    let mut request: EditTaskRequest = parse_patch(patch.as_deref())?;
    if let Some(value) = name {
        request = request.with_name(value);
    }
    if let Some(value) = description {
        request = request.with_description(value);
    }
    if let Some(value) = status {
        request = request.with_status(value);
    }
    if let Some(date) = start_date {
        request = request.with_start_date(date);
    }
    if let Some(date) = done_date {
        request = request.with_done_date(date);
    }
    Ok(request)
}

pub fn project_list_request(args: ProjectListArgs) -> ListProjectsRequest {
    let ProjectListArgs {
        name,
        start_date,
        due_date,
    } = args;
    let mut request = ListProjectsRequest::new();
    if let Some(fragment) = name {
        request = request.with_name(fragment);
    }
    if let Some(date) = start_date {
        request = request.with_start_date(date);
    }
    if let Some(date) = due_date {
        request = request.with_due_date(date);
    }
    request
}

pub fn project_edit_request(args: ProjectEditArgs) -> Result<EditProjectRequest, Failure> {
    let ProjectEditArgs {
        patch,
        name,
        description,
        start_date,
    } = args;
    let mut request: EditProjectRequest = parse_patch(patch.as_deref())?;
    if let Some(value) = name {
        request = request.with_name(value);
    }
    if let Some(value) = description {
        request = request.with_description(value);
    }
    if let Some(date) = start_date {
        request = request.with_start_date(date);
    }
    Ok(request)
}
