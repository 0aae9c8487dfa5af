//! Domain model for task lifecycle management.
//!
//! Tasks move between `available`, `todo`, and `done`, carry the timestamps
//! those transitions imply, and reference at most one project. Persistence
//! and orchestration live outside this boundary.

mod error;
mod filter;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use filter::TaskFilter;
pub use ids::{ParseTaskIdError, TaskId};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task, TaskEdit};
