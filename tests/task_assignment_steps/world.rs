//! Shared world state for task assignment BDD scenarios.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::collections::HashMap;
use std::sync::Arc;
use taskboard::{
    assignment::{
        domain::{Assignment, Reassignment},
        ports::AssignmentError,
        services::SequentialAssignmentCoordinator,
    },
    project::{
        adapters::memory::InMemoryProjectRepository, domain::ProjectId, services::ProjectService,
    },
    task::{
        adapters::memory::InMemoryTaskRepository, domain::TaskId, services::TaskLifecycleService,
    },
};

/// Task service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;
/// Project service type used by the BDD world.
pub type TestProjectService =
    ProjectService<InMemoryProjectRepository, InMemoryTaskRepository, DefaultClock>;
/// Coordinator type used by the BDD world.
pub type TestCoordinator = SequentialAssignmentCoordinator<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    DefaultClock,
>;

/// Scenario world for assignment behaviour tests.
pub struct AssignmentWorld {
    pub tasks: TestTaskService,
    pub projects: TestProjectService,
    pub coordinator: TestCoordinator,
    pub task_ids: HashMap<String, TaskId>,
    pub project_ids: HashMap<String, ProjectId>,
    pub last_assignment: Option<Result<Assignment, AssignmentError>>,
    pub last_move: Option<Result<Reassignment, AssignmentError>>,
    pub edit_window: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl AssignmentWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let task_store = Arc::new(InMemoryTaskRepository::new());
        let project_store = Arc::new(InMemoryProjectRepository::new());

        Self {
            tasks: TaskLifecycleService::new(Arc::clone(&task_store), Arc::clone(&clock)),
            projects: ProjectService::new(
                Arc::clone(&project_store),
                Arc::clone(&task_store),
                Arc::clone(&clock),
            ),
            coordinator: SequentialAssignmentCoordinator::new(task_store, project_store, clock),
            task_ids: HashMap::new(),
            project_ids: HashMap::new(),
            last_assignment: None,
            last_move: None,
            edit_window: None,
        }
    }

    /// Looks up a task created earlier in the scenario.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.task_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task named {name} in scenario world"))
    }

    /// Looks up a project created earlier in the scenario.
    pub fn project_id(&self, name: &str) -> Result<ProjectId, eyre::Report> {
        self.project_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no project named {name} in scenario world"))
    }
}

impl Default for AssignmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// One day after the current wall-clock time.
#[must_use]
pub fn tomorrow() -> DateTime<Utc> {
    Utc::now() + TimeDelta::days(1)
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AssignmentWorld {
    AssignmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
