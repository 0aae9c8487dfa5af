//! Command-line argument definitions.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use taskboard::{project::domain::ProjectId, task::domain::TaskId};

/// Task and project management backend.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the task and project tables if they are missing.
    Migrate,
    /// Task commands.
    Task {
        #[command(subcommand)]
        action: TaskCommand,
    },
    /// Project commands.
    Project {
        #[command(subcommand)]
        action: ProjectCommand,
    },
}

/// Task commands.
#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Create a task.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        /// Due date as an RFC 3339 timestamp.
        #[arg(long)]
        due_date: DateTime<Utc>,
    },
    /// List active tasks.
    List(TaskListArgs),
    /// Show one task.
    Get { id: TaskId },
    /// Edit a task.
    Edit {
        id: TaskId,
        #[command(flatten)]
        changes: TaskEditArgs,
    },
    /// Return a task to `available` and clear its progress dates.
    Reset { id: TaskId },
    /// Soft-delete a task.
    Delete { id: TaskId },
}

/// Filters for `task list`.
#[derive(Debug, Clone, Default, Args)]
pub struct TaskListArgs {
    /// Case-insensitive name fragment.
    #[arg(long)]
    pub name: Option<String>,
    /// One of `available`, `todo`, `done`.
    #[arg(long)]
    pub status: Option<String>,
    /// Calendar day the task was started.
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    /// Calendar day the task is due.
    #[arg(long)]
    pub due_date: Option<NaiveDate>,
    /// Calendar day the task was finished.
    #[arg(long)]
    pub done_date: Option<NaiveDate>,
}

/// Changes for `task edit`.
#[derive(Debug, Clone, Default, Args)]
pub struct TaskEditArgs {
    /// JSON object of camelCase fields; flags below take precedence.
    #[arg(long)]
    pub patch: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub start_date: Option<DateTime<Utc>>,
    #[arg(long)]
    pub done_date: Option<DateTime<Utc>>,
}

/// Project commands.
#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        start_date: Option<DateTime<Utc>>,
        #[arg(long)]
        due_date: DateTime<Utc>,
    },
    /// List active projects with their tasks.
    List(ProjectListArgs),
    /// Show one project with its tasks.
    Get { id: ProjectId },
    /// Edit a project's name, description, or start date.
    Edit {
        id: ProjectId,
        #[command(flatten)]
        changes: ProjectEditArgs,
    },
    /// Soft-delete a project.
    Delete { id: ProjectId },
    /// Assign an unassigned task to a project.
    Assign {
        project_id: ProjectId,
        task_id: TaskId,
    },
    /// Move a task from one project to another.
    Move {
        current_project_id: ProjectId,
        task_id: TaskId,
        next_project_id: ProjectId,
    },
}

/// Filters for `project list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectListArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    #[arg(long)]
    pub due_date: Option<NaiveDate>,
}

/// Changes for `project edit`.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectEditArgs {
    /// JSON object of camelCase fields; flags below take precedence.
    #[arg(long)]
    pub patch: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub start_date: Option<DateTime<Utc>>,
}
