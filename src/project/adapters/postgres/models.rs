//! Diesel row models for project persistence.

use super::schema::projects;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for project records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Derived slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Task references in list order.
    pub task_ids: Vec<uuid::Uuid>,
    /// Soft-deletion flag.
    pub is_deleted: bool,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for project records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Derived slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Task references in list order.
    pub task_ids: Vec<uuid::Uuid>,
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
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
pub struct ProjectChangeset {
    /// Display name.
    pub name: String,
    /// Derived slug.
    pub slug: String,
    /// Description.
    pub description: String,
    /// Start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Task references in list order.
    pub task_ids: Vec<uuid::Uuid>,
    /// Soft-deletion flag.
    pub is_deleted: bool,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
