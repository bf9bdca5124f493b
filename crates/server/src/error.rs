//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. This module is the single
//! place where an error becomes a status code and a JSON body of the shape
//! `{"message": "...", "error": "..."}` (`error` only when there is detail
//! worth showing the caller).

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::gemini::GeminiError;
use crate::models::ValidationError;
use crate::services::{AuthError, TokenError};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Registration failed for any reason, duplicates included.
    #[error("Registration failed: {0}")]
    Registration(AuthError),

    /// Wrong email or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Login failed for a reason other than bad credentials.
    #[error("Login failed: {0}")]
    LoginFailed(String),

    /// Request body failed validation.
    #[error("Invalid data: {0}")]
    Validation(#[from] ValidationError),

    /// Gemini call failed. `context` is the caller-facing message.
    #[error("{context}: {source}")]
    Upstream {
        context: &'static str,
        source: GeminiError,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing or unusable credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body over the route's limit.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl AppError {
    /// Wrap a Gemini failure with the message the caller should see.
    #[must_use]
    pub const fn upstream(context: &'static str, source: GeminiError) -> Self {
        Self::Upstream { context, source }
    }

    /// Map a login failure: bad credentials stay 401, anything else is 500.
    #[must_use]
    pub fn login(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            other => Self::LoginFailed(other.to_string()),
        }
    }

    fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::NotFound) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) | Self::LoginFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upstream {
                source: GeminiError::NotConfigured,
                ..
            } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Registration(_)
            | Self::Validation(_)
            | Self::BadRequest(_)
            | Self::Upstream { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    // Internal details never reach the client.
    fn body(&self) -> ErrorBody {
        let (message, error) = match self {
            Self::Database(RepositoryError::NotFound) => ("Not found".to_owned(), None),
            Self::Database(_) | Self::Internal(_) => ("Server error".to_owned(), None),
            Self::Registration(err) => (
                "Registration failed".to_owned(),
                match err {
                    AuthError::Repository(_) | AuthError::PasswordHash => None,
                    other => Some(other.to_string()),
                },
            ),
            Self::InvalidCredentials => ("Invalid credentials".to_owned(), None),
            Self::LoginFailed(_) => ("Login failed".to_owned(), None),
            Self::Validation(err) => ("Invalid data".to_owned(), Some(err.to_string())),
            Self::Upstream {
                source: GeminiError::NotConfigured,
                ..
            } => (GeminiError::NotConfigured.to_string(), None),
            Self::Upstream { context, source } => ((*context).to_owned(), Some(source.detail())),
            Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::BadRequest(msg) => (msg.clone(), None),
            Self::PayloadTooLarge => ("Request body too large".to_owned(), None),
        };
        ErrorBody { message, error }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else if let Self::Upstream { source, .. } = &self {
            tracing::warn!(error = %source, "Gemini request failed");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::UserNotFound => Self::Unauthorized("User no longer exists".to_owned()),
            AuthError::Repository(e) => Self::Database(e),
            AuthError::PasswordHash => Self::Internal(err.to_string()),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => Self::Unauthorized("Token expired".to_owned()),
            TokenError::Invalid => Self::Unauthorized("Invalid token".to_owned()),
            TokenError::Encode(e) => Self::Internal(format!("token signing failed: {e}")),
        }
    }
}

// Malformed JSON is reported like any other invalid payload.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge;
        }
        Self::Validation(ValidationError::new("body", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        Self::BadRequest("Invalid request".to_owned())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}
