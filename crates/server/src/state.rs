//! Application state shared across handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::gemini::{GeminiClient, GeminiError};
use crate::services::TokenKeys;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    gemini: GeminiClient,
    tokens: TokenKeys,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Gemini HTTP client cannot be built.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, GeminiError> {
        let gemini = GeminiClient::new(&config.gemini)?;
        let tokens = TokenKeys::new(&config.jwt);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gemini,
                tokens,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn gemini(&self) -> &GeminiClient {
        &self.inner.gemini
    }

    /// Keys for issuing and verifying bearer tokens.
    #[must_use]
    pub fn tokens(&self) -> &TokenKeys {
        &self.inner.tokens
    }
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(state: &AppState) -> Self {
        state.inner.tokens.clone()
    }
}
