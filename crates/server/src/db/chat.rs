//! Chat history repository.

use sqlx::PgPool;

use folio_core::UserId;

use super::{HISTORY_LIMIT, RepositoryError};
use crate::models::ChatMessage;

const CHAT_COLUMNS: &str = "id, user_id, message, response, created_at";

pub struct ChatRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChatRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record one chat turn.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails (including an
    /// owner deleted mid-request).
    pub async fn create(
        &self,
        user_id: UserId,
        message: &str,
        response: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let row = sqlx::query_as(&format!(
            "INSERT INTO portfolio.chat_message (user_id, message, response) \
             VALUES ($1, $2, $3) RETURNING {CHAT_COLUMNS}"
        ))
        .bind(user_id)
        .bind(message)
        .bind(response)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// The user's most recent turns, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_for_user(&self, user_id: UserId) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query_as(&format!(
            "SELECT {CHAT_COLUMNS} FROM portfolio.chat_message \
             WHERE user_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2"
        ))
        .bind(user_id)
        .bind(HISTORY_LIMIT)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
