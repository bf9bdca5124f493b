//! Error types for the Gemini API client.

use thiserror::Error;

/// Errors that can occur when calling the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// `GEMINI_API_KEY` is not configured.
    #[error("Gemini API key not set")]
    NotConfigured,

    /// The request never produced a response (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned upstream.
        status: u16,
        /// Message from the error envelope, or the raw body.
        message: String,
        /// Raw response body, forwarded to the caller as-is.
        body: String,
    },

    /// A 2xx body that does not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Detail to surface to the caller.
    ///
    /// When Gemini sent a body it is passed through untouched; otherwise the
    /// error's own message is used.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Api { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}
