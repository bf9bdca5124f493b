//! Chat history rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::{ChatMessageId, UserId};

/// One chat turn: what the user asked and what the model answered.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub user_id: UserId,
    pub message: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}
