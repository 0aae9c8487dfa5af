//! Taskboard: task and project management backend.
//!
//! Clients create projects and tasks, assign tasks to projects, move them
//! between projects, list records by name, status, and calendar day, and
//! soft-delete records they no longer need.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture:
//!
//! - **Domain**: Pure business rules with no infrastructure dependencies
//! - **Ports**: Async repository and coordinator traits
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over the ports, with an injected clock
//!
//! # Modules
//!
//! - [`task`]: Task creation, edits, status rules, and listing
//! - [`project`]: Project creation, edits, and listing with task summaries
//! - [`assignment`]: Assigning and moving tasks between projects
//! - [`shared`]: Validated text, slugs, calendar days, error kinds
//! - [`config`] and [`telemetry`]: Layered configuration and logging
//! - [`database`]: Connection pooling and schema setup

pub mod assignment;
pub mod config;
pub mod database;
pub mod project;
pub mod shared;
pub mod task;
pub mod telemetry;
