//! Domain model for projects.

mod error;
mod filter;
mod ids;
mod overview;
mod project;

pub use error::ProjectDomainError;
pub use filter::ProjectFilter;
pub use ids::{ParseProjectIdError, ProjectId};
pub use overview::{ProjectOverview, TaskSummary};
pub use project::{PersistedProjectData, Project, ProjectEdit};
