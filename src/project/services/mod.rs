//! Application services for project management.

mod manager;

pub use manager::{
    CreateProjectRequest, EditProjectRequest, ListProjectsRequest, ProjectService,
    ProjectServiceError, ProjectServiceResult,
};
