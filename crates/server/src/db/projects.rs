//! Project repository.

use sqlx::PgPool;

use folio_core::ProjectId;

use super::RepositoryError;
use crate::models::{NewProject, Project};

const PROJECT_COLUMNS: &str =
    "id, title, description, image_url, tags, github_url, demo_url, created_at, updated_at";

/// Repository for project database operations.
pub struct ProjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        let projects = sqlx::query_as(&format!(
            "SELECT {PROJECT_COLUMNS} FROM portfolio.project ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(projects)
    }

    /// Insert a project. `input` is expected to be validated already.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &NewProject) -> Result<Project, RepositoryError> {
        let project = sqlx::query_as(&format!(
            "INSERT INTO portfolio.project (title, description, image_url, tags, github_url, demo_url) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.image_url.as_deref())
        .bind(&input.tags)
        .bind(input.github_url.as_deref())
        .bind(input.demo_url.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(project)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the project does not exist.
    pub async fn delete(&self, id: ProjectId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portfolio.project WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        super::expect_affected(result.rows_affected())
    }
}
