//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PORTFOLIO_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `JWT_SECRET` - Token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `PORTFOLIO_HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` / `PORTFOLIO_PORT` - Listen port (default: 5000)
//! - `JWT_EXPIRY_HOURS` - Token lifetime in hours (default: 24)
//! - `GEMINI_API_KEY` - Gemini API key; AI routes answer 500 without it
//! - `GEMINI_BASE_URL` - Gemini API base (default: <https://generativelanguage.googleapis.com>)
//! - `GEMINI_CHAT_MODEL` - Text model (default: gemini-pro)
//! - `GEMINI_VISION_MODEL` - Vision model (default: gemini-pro-vision)
//! - `GEMINI_TIMEOUT_SECS` - Upstream request timeout (default: 60)
//! - `MAX_IMAGE_BYTES` - Request body limit for image uploads (default: 10 MiB)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated origins (default: any origin)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "jwt-key",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Token signing configuration
    pub jwt: JwtConfig,
    /// Upstream generative-AI configuration
    pub gemini: GeminiConfig,
    /// Body limit for the image classifier route
    pub max_image_bytes: usize,
    /// Allowed CORS origins; empty means any origin
    pub cors_allowed_origins: Vec<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// JWT signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 signing secret
    pub secret: SecretString,
    /// How long issued tokens stay valid
    pub expiry: Duration,
}

/// Gemini `generateContent` configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; `None` leaves the AI routes disabled
    pub api_key: Option<SecretString>,
    /// Base URL, overridable so tests can point at a stub
    pub base_url: Url,
    /// Model used for chat replies
    pub chat_model: String,
    /// Model used for image classification
    pub vision_model: String,
    /// Whole-request timeout for upstream calls
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field(
                "api_key",
                &self.api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("base_url", &self.base_url.as_str())
            .field("chat_model", &self.chat_model)
            .field("vision_model", &self.vision_model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("PORTFOLIO_DATABASE_URL")?;
        let host = parse_env("PORTFOLIO_HOST", "127.0.0.1")?;
        let port = match get_optional_env("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?,
            None => parse_env("PORTFOLIO_PORT", "5000")?,
        };

        let jwt = JwtConfig::from_env()?;
        let gemini = GeminiConfig::from_env()?;
        let max_image_bytes = parse_env("MAX_IMAGE_BYTES", &DEFAULT_MAX_IMAGE_BYTES.to_string())?;
        let cors_allowed_origins = get_optional_env("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        Ok(Self {
            database_url,
            host,
            port,
            jwt,
            gemini,
            max_image_bytes,
            cors_allowed_origins,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = get_validated_secret("JWT_SECRET")?;
        validate_secret_length(&secret, "JWT_SECRET")?;

        let hours: u64 = parse_env("JWT_EXPIRY_HOURS", "24")?;

        Ok(Self {
            secret,
            expiry: token_expiry(hours)?,
        })
    }
}

/// Token lifetime for `JWT_EXPIRY_HOURS`.
fn token_expiry(hours: u64) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidEnvVar("JWT_EXPIRY_HOURS".to_string(), reason.to_string())
    };

    if hours == 0 {
        return Err(invalid("must be at least 1"));
    }
    hours
        .checked_mul(60 * 60)
        .map(Duration::from_secs)
        .ok_or_else(|| invalid("value is too large"))
}

impl GeminiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
        let base_url = Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("GEMINI_BASE_URL".to_string(), e.to_string()))?;
        let timeout_secs: u64 = parse_env("GEMINI_TIMEOUT_SECS", "60")?;

        Ok(Self {
            api_key: get_optional_env("GEMINI_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            base_url,
            chat_model: get_env_or_default("GEMINI_CHAT_MODEL", "gemini-pro"),
            vision_model: get_env_or_default("GEMINI_VISION_MODEL", "gemini-pro-vision"),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) into `T`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

/// Validate that a signing secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_JWT_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_bounds() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("zzzzzz") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
        assert!(shannon_entropy("Q7#kLp2@xVn9!dR4") > 3.3);
    }

    #[test]
    fn test_placeholder_secret_is_rejected() {
        let err = validate_secret_strength("changeme", "JWT_SECRET").unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(ref var, _) if var == "JWT_SECRET"));
    }

    #[test]
    fn test_low_entropy_secret_is_rejected() {
        let err = validate_secret_strength(&"ab".repeat(20), "JWT_SECRET").unwrap_err();
        assert!(err.to_string().contains("entropy too low"));
    }

    #[test]
    fn test_strong_secret_passes() {
        assert!(validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "JWT_SECRET").is_ok());
    }

    #[test]
    fn test_secret_length() {
        assert!(validate_secret_length(&SecretString::from("short"), "JWT_SECRET").is_err());
        assert!(validate_secret_length(&SecretString::from("k".repeat(32)), "JWT_SECRET").is_ok());
    }

    #[test]
    fn test_token_expiry() {
        assert_eq!(token_expiry(24).unwrap(), Duration::from_secs(86_400));
        assert!(matches!(
            token_expiry(0),
            Err(ConfigError::InvalidEnvVar(ref var, _)) if var == "JWT_EXPIRY_HOURS"
        ));
        let err = token_expiry(u64::MAX).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://localhost:5173/ ,, https://folio.dev"),
            vec!["http://localhost:5173", "https://folio.dev"]
        );
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn test_gemini_config_debug_redacts_key() {
        let config = GeminiConfig {
            api_key: Some(SecretString::from("AIzaSy-super-private-key")),
            base_url: Url::parse(DEFAULT_GEMINI_BASE_URL).unwrap(),
            chat_model: "gemini-pro".to_string(),
            vision_model: "gemini-pro-vision".to_string(),
            timeout: Duration::from_secs(60),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("gemini-pro-vision"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-private-key"));
    }
}
