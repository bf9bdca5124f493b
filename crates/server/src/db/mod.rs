//! Database access for the portfolio API.
//!
//! # Schema: `portfolio`
//!
//! - `user` - accounts with an argon2 password hash and a role
//! - `project` - portfolio projects
//! - `testimonial` - visitor testimonials, hidden until approved
//! - `contact` - contact form submissions
//! - `chat_message` - one row per chat turn
//! - `image_classification` - one row per classified upload
//!
//! # Migrations
//!
//! Migrations live in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p folio-cli -- migrate
//! ```
//!
//! Queries are runtime-checked (`sqlx::query_as`) so the crate builds
//! without a live database.

pub mod chat;
pub mod classifications;
pub mod contacts;
pub mod projects;
pub mod testimonials;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use chat::ChatRepository;
pub use classifications::ClassificationRepository;
pub use contacts::ContactRepository;
pub use projects::ProjectRepository;
pub use testimonials::TestimonialRepository;
pub use users::{UserCredentials, UserRepository};

/// History endpoints return at most this many rows.
pub const HISTORY_LIMIT: i64 = 50;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique-constraint violation to `Conflict(what)`.
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(format!("{what} already exists"));
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    pool_options().connect(database_url.expose_secret()).await
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
}

/// Return `NotFound` when a `DELETE`/`UPDATE` touched no rows.
pub(crate) const fn expect_affected(rows: u64) -> Result<(), RepositoryError> {
    if rows == 0 {
        Err(RepositoryError::NotFound)
    } else {
        Ok(())
    }
}
