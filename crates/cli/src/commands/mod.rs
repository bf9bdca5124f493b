//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;

/// Missing database configuration.
#[derive(Debug, thiserror::Error)]
#[error("Missing environment variable: PORTFOLIO_DATABASE_URL (or DATABASE_URL)")]
pub struct MissingDatabaseUrl;

/// Database URL from `PORTFOLIO_DATABASE_URL`, falling back to `DATABASE_URL`.
pub fn database_url() -> Result<SecretString, MissingDatabaseUrl> {
    dotenvy::dotenv().ok();

    std::env::var("PORTFOLIO_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MissingDatabaseUrl)
}

/// Connect using the configured database URL.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let url = database_url()?;
    tracing::info!("Connecting to database...");
    Ok(folio_server::db::create_pool(&url).await?)
}
