//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Derived slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Status.
    pub status: String,
    /// Start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Done date.
    pub done_date: Option<DateTime<Utc>>,
    /// Owning project.
    pub project_id: Option<uuid::Uuid>,
    /// Soft-deletion flag.
    pub is_deleted: bool,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Derived slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Status.
    pub status: String,
    /// Start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Done date.
    pub done_date: Option<DateTime<Utc>>,
    /// Owning project.
    pub project_id: Option<uuid::Uuid>,
    /// Soft-deletion flag.
    pub is_deleted: bool,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-row changeset; `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Display name.
    pub name: String,
    /// Derived slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Status.
    pub status: String,
    /// Start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Done date.
    pub done_date: Option<DateTime<Utc>>,
    /// Owning project.
    pub project_id: Option<uuid::Uuid>,
    /// Soft-deletion flag.
    pub is_deleted: bool,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
