//! `PostgreSQL` repository implementation for project storage.

use super::{
    models::{NewProjectRow, ProjectChangeset, ProjectRow},
    schema::projects,
};
use crate::{
    database::{PgPool, contains_pattern},
    project::{
        domain::{PersistedProjectData, Project, ProjectFilter, ProjectId},
        ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
    },
    shared::{DeletionScope, RecordDescription, RecordName, Slug},
    task::domain::TaskId,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let snapshot = project.clone();
        self.run_blocking(move |connection| write_project(connection, &snapshot))
            .await
    }

    async fn find_by_id(
        &self,
        id: ProjectId,
        scope: DeletionScope,
    ) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let mut query = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .into_boxed();
            if scope == DeletionScope::ActiveOnly {
                query = query.filter(projects::is_deleted.eq(false));
            }
            let row = query
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_many(&self, filter: &ProjectFilter) -> ProjectRepositoryResult<Vec<Project>> {
        let criteria = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = projects::table
                .filter(projects::is_deleted.eq(false))
                .select(ProjectRow::as_select())
                .into_boxed();
            if let Some(fragment) = criteria.name_contains() {
                query = query.filter(projects::name.ilike(contains_pattern(fragment)));
            }
            if let Some(window) = criteria.start_date() {
                query = query.filter(
                    projects::start_date
                        .ge(window.start())
                        .and(projects::start_date.lt(window.end())),
                );
            }
            if let Some(window) = criteria.due_date() {
                query = query.filter(
                    projects::due_date
                        .ge(window.start())
                        .and(projects::due_date.lt(window.end())),
                );
            }
            let rows = query
                .order((projects::created_at.asc(), projects::id.asc()))
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }
}

/// Loads an active project and locks its row for the rest of the transaction.
pub(crate) fn find_project_for_update(
    connection: &mut PgConnection,
    id: ProjectId,
) -> ProjectRepositoryResult<Option<Project>> {
    let row = projects::table
        .filter(projects::id.eq(id.into_inner()))
        .filter(projects::is_deleted.eq(false))
        .select(ProjectRow::as_select())
        .for_update()
        .first::<ProjectRow>(connection)
        .optional()
        .map_err(ProjectRepositoryError::persistence)?;
    row.map(row_to_project).transpose()
}

/// Overwrites the mutable columns of an existing project row.
pub(crate) fn write_project(
    connection: &mut PgConnection,
    project: &Project,
) -> ProjectRepositoryResult<()> {
    let affected =
        diesel::update(projects::table.filter(projects::id.eq(project.id().into_inner())))
            .set(&to_changeset(project))
            .execute(connection)
            .map_err(ProjectRepositoryError::persistence)?;
    if affected == 0 {
        return Err(ProjectRepositoryError::NotFound(project.id()));
    }
    Ok(())
}

fn task_uuids(project: &Project) -> Vec<uuid::Uuid> {
    project.tasks().iter().map(|id| id.into_inner()).collect()
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        slug: project.slug().as_str().to_owned(),
        description: project.description().as_str().to_owned(),
        start_date: project.start_date(),
        due_date: project.due_date(),
        task_ids: task_uuids(project),
        is_deleted: project.is_deleted(),
        deleted_at: project.deleted_at(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn to_changeset(project: &Project) -> ProjectChangeset {
    ProjectChangeset {
        name: project.name().as_str().to_owned(),
        slug: project.slug().as_str().to_owned(),
        description: project.description().as_str().to_owned(),
        start_date: project.start_date(),
        task_ids: task_uuids(project),
        is_deleted: project.is_deleted(),
        deleted_at: project.deleted_at(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        slug,
        description,
        start_date,
        due_date,
        task_ids,
        is_deleted,
        deleted_at,
        created_at,
        updated_at,
    } = row;

    debug_assert!(
        is_deleted == deleted_at.is_some(),
        "project {id} has is_deleted={is_deleted} but deleted_at={deleted_at:?}"
    );

    let data = PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name: RecordName::new(name).map_err(ProjectRepositoryError::persistence)?,
        slug: Slug::from_persisted(slug),
        description: RecordDescription::new(description)
            .map_err(ProjectRepositoryError::persistence)?,
        start_date,
        due_date,
        tasks: task_ids.into_iter().map(TaskId::from_uuid).collect(),
        deleted_at,
        created_at,
        updated_at,
    };
    Ok(Project::from_persisted(data))
}
