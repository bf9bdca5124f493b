//! Contact form repository.

use sqlx::PgPool;

use folio_core::ContactId;

use super::RepositoryError;
use crate::models::{Contact, ValidContact};

const CONTACT_COLUMNS: &str = "id, name, email, subject, message, created_at";

/// Repository for contact submissions.
pub struct ContactRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ValidContact) -> Result<Contact, RepositoryError> {
        let row = sqlx::query_as(&format!(
            "INSERT INTO portfolio.contact (name, email, subject, message) \
             VALUES ($1, $2, $3, $4) RETURNING {CONTACT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.email.as_str())
        .bind(input.subject.as_deref())
        .bind(&input.message)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// All submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Contact>, RepositoryError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {CONTACT_COLUMNS} FROM portfolio.contact ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the submission does not exist.
    pub async fn delete(&self, id: ContactId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portfolio.contact WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        super::expect_affected(result.rows_affected())
    }
}
