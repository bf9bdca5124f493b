//! Testimonial repository.

use sqlx::PgPool;

use folio_core::TestimonialId;

use super::RepositoryError;
use crate::models::{NewTestimonial, Testimonial};

const TESTIMONIAL_COLUMNS: &str =
    "id, name, role, company, content, image_url, approved, created_at, updated_at";

/// Repository for testimonial database operations.
pub struct TestimonialRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TestimonialRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Approved testimonials only, newest first. This is the public list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_approved(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM portfolio.testimonial \
             WHERE approved ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Every testimonial, pending ones included.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Testimonial>, RepositoryError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM portfolio.testimonial \
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a testimonial awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &NewTestimonial) -> Result<Testimonial, RepositoryError> {
        let row = sqlx::query_as(&format!(
            "INSERT INTO portfolio.testimonial (name, role, company, content, image_url, approved) \
             VALUES ($1, $2, $3, $4, $5, FALSE) RETURNING {TESTIMONIAL_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(input.role.as_deref())
        .bind(input.company.as_deref())
        .bind(&input.content)
        .bind(input.image_url.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Mark a testimonial approved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial does not exist.
    pub async fn approve(&self, id: TestimonialId) -> Result<Testimonial, RepositoryError> {
        let row: Option<Testimonial> = sqlx::query_as(&format!(
            "UPDATE portfolio.testimonial SET approved = TRUE, updated_at = NOW() \
             WHERE id = $1 RETURNING {TESTIMONIAL_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the testimonial does not exist.
    pub async fn delete(&self, id: TestimonialId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM portfolio.testimonial WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        super::expect_affected(result.rows_affected())
    }
}
