//! `PostgreSQL` adapters for task lifecycle persistence.

pub(crate) mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresTaskRepository;
pub(crate) use repository::{find_task_for_update, write_task};
