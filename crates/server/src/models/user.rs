//! User domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use folio_core::{Email, UserId, UserRole, Username};

/// A registered account.
///
/// The password hash is deliberately absent; it only lives in the
/// repository's row type and never leaves the database layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
