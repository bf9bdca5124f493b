//! Image classification history rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::{ClassificationId, UserId};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ImageClassification {
    pub id: ClassificationId,
    /// `None` for anonymous uploads or once the owner was deleted.
    pub user_id: Option<UserId>,
    pub image_url: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}
