//! `PostgreSQL` adapters for project persistence.

pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresProjectRepository;
pub(crate) use repository::{find_project_for_update, write_project};
