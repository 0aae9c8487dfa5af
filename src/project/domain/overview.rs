//! Read model joining a project with the tasks it references.

use super::Project;
use crate::{
    shared::{RecordDescription, RecordName},
    task::domain::{Task, TaskId, TaskStatus},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Subset of task fields shown alongside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: RecordName,
    /// Task description.
    pub description: RecordDescription,
    /// Current status.
    pub status: TaskStatus,
    /// Start date, if set.
    pub start_date: Option<DateTime<Utc>>,
    /// Due date.
    pub due_date: DateTime<Utc>,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().clone(),
            description: task.description().clone(),
            status: task.status(),
            start_date: task.start_date(),
            due_date: task.due_date(),
        }
    }
}

/// A project together with summaries of its referenced tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverview {
    /// The project record.
    #[serde(flatten)]
    pub project: Project,
    /// Summaries in the project's list order.
    #[serde(rename = "taskDetails")]
    pub task_details: Vec<TaskSummary>,
}

impl ProjectOverview {
    /// Joins `project` with `tasks`, following the project's list order.
    ///
    /// References to tasks absent from `tasks` are skipped; a task listed
    /// twice appears twice.
    #[must_use]
    pub fn assemble(project: Project, tasks: &[Task]) -> Self {
        let by_id: HashMap<TaskId, &Task> = tasks.iter().map(|task| (task.id(), task)).collect();
        let task_details = project
            .tasks()
            .iter()
            .filter_map(|id| by_id.get(id).map(|task| TaskSummary::from(*task)))
            .collect();
        Self {
            project,
            task_details,
        }
    }
}
