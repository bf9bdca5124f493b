//! Image classification history repository.

use sqlx::PgPool;

use folio_core::UserId;

use super::{HISTORY_LIMIT, RepositoryError};
use crate::models::ImageClassification;

const CLASSIFICATION_COLUMNS: &str = "id, user_id, image_url, result, created_at";

pub struct ClassificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClassificationRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a classification. Uploaded bytes are not stored, so
    /// `image_url` is left empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Option<UserId>,
        result: &str,
    ) -> Result<ImageClassification, RepositoryError> {
        let row = sqlx::query_as(&format!(
            "INSERT INTO portfolio.image_classification (user_id, image_url, result) \
             VALUES ($1, '', $2) RETURNING {CLASSIFICATION_COLUMNS}"
        ))
        .bind(user_id)
        .bind(result)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// The user's most recent classifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<ImageClassification>, RepositoryError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {CLASSIFICATION_COLUMNS} FROM portfolio.image_classification \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(HISTORY_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
