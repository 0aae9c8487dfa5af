//! Shared helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, TimeDelta, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use taskboard::{
    config::DatabaseConfig,
    database::{self, PgPool},
    project::domain::Project,
    shared::{RecordDescription, RecordName},
    task::domain::Task,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Template database holding the migrated schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Creates a runtime for driving the async ports from synchronous tests.
///
/// # Panics
///
/// Panics when the runtime cannot be built.
#[must_use]
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn ensure_template(cluster: &TestCluster) -> eyre::Result<()> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            apply_schema(&mut conn)?;
            Ok(())
        })
        .map_err(|e| eyre::eyre!("template setup failed: {e}"))?;
    Ok(())
}

fn apply_schema(conn: &mut PgConnection) -> eyre::Result<()> {
    conn.batch_execute(database::CREATE_SCHEMA_SQL)
        .map_err(|e| eyre::eyre!("schema setup failed: {e}"))
}

/// Database cloned from the template for a single test; dropped with the
/// value.
pub struct TestDatabase {
    cluster: &'static TestCluster,
    name: String,
    pool: Option<PgPool>,
}

impl TestDatabase {
    /// Clones the template into a fresh database and connects a pool to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the template, the database, or the pool cannot
    /// be created.
    pub fn create(cluster: &'static TestCluster, prefix: &str) -> eyre::Result<Self> {
        ensure_template(cluster)?;
        let name = format!("{prefix}_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(name.as_str(), TEMPLATE_DB)
            .map_err(|e| eyre::eyre!("failed to create {name}: {e}"))?;
        let mut database = Self {
            cluster,
            name,
            pool: None,
        };
        let config = DatabaseConfig {
            url: cluster.connection().database_url(&database.name),
            max_connections: 4,
        };
        database.pool = Some(database::build_pool(&config)?);
        Ok(database)
    }

    /// Returns a handle to the database's connection pool.
    ///
    /// # Panics
    ///
    /// Panics after the database has started dropping.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone().expect("pool lives as long as the database")
    }
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        drop(self.pool.take());
        if let Err(e) = self.cluster.drop_database(self.name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.name);
        }
    }
}

/// Due date one week out.
#[must_use]
pub fn next_week() -> DateTime<Utc> {
    Utc::now() + TimeDelta::days(7)
}

/// Builds an unsaved task.
#[must_use]
pub fn new_task(name: &str) -> Task {
    Task::new(
        RecordName::new(name).expect("valid name"),
        RecordDescription::new("Integration task").expect("valid description"),
        next_week(),
        &DefaultClock,
    )
}

/// Builds an unsaved project.
#[must_use]
pub fn new_project(name: &str) -> Project {
    Project::new(
        RecordName::new(name).expect("valid name"),
        RecordDescription::new("Integration project").expect("valid description"),
        None,
        next_week(),
        &DefaultClock,
    )
}
