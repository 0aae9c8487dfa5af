//! Connection pooling and schema setup for the `PostgreSQL` adapters.

use crate::config::DatabaseConfig;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// Pool type shared by every `PostgreSQL` adapter.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// SQL creating the task and project tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_tasks_and_projects/up.sql");

/// Errors raised while connecting to or preparing the database.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No database URL was configured.
    #[error("database url is not configured (set TASKBOARD_DATABASE__URL)")]
    NotConfigured,

    /// The pool could not be built or a connection could not be checked out.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// A schema statement failed.
    #[error("schema migration failed: {0}")]
    Migration(#[from] diesel::result::Error),
}

/// Builds a connection pool from configuration.
///
/// # Errors
///
/// Returns [`DatabaseError::NotConfigured`] when the URL is empty and
/// [`DatabaseError::Pool`] when the initial connections cannot be opened.
pub fn build_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    if !config.is_configured() {
        return Err(DatabaseError::NotConfigured);
    }
    let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)?;
    Ok(pool)
}

/// Creates the task and project tables if they do not exist yet.
///
/// # Errors
///
/// Returns [`DatabaseError`] when no connection is available or a
/// statement fails.
pub fn apply_migrations(pool: &PgPool) -> Result<(), DatabaseError> {
    let mut connection = pool.get()?;
    connection.batch_execute(CREATE_SCHEMA_SQL)?;
    tracing::info!("database schema is up to date");
    Ok(())
}

/// Escapes `LIKE` metacharacters and wraps the fragment for substring search.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
