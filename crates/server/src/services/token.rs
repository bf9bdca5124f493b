//! Bearer tokens.
//!
//! HS256-signed JWTs carrying the user id and role. Tokens are stateless:
//! there is no revocation list, so a token stays valid until `exp`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use folio_core::{UserId, UserRole};

use crate::config::JwtConfig;
use crate::models::User;

/// Errors from issuing or verifying a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// `exp` is in the past.
    #[error("token expired")]
    Expired,

    /// Bad signature, wrong algorithm, or malformed token.
    #[error("invalid token")]
    Invalid,

    /// Signing failed.
    #[error("failed to sign token: {0}")]
    Encode(jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid,
        }
    }
}

/// Claims carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string.
    pub sub: String,
    pub role: UserRole,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expires at (Unix seconds).
    pub exp: i64,
}

impl Claims {
    /// Claims for `user`, valid for `ttl` from now.
    #[must_use]
    pub fn for_user(user: &User, ttl: Duration) -> Self {
        let iat = Utc::now().timestamp();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: user.id.to_string(),
            role: user.role,
            iat,
            exp: iat.saturating_add(ttl),
        }
    }

    /// The user id in `sub`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if `sub` is not an id.
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

/// Signing and verification keys derived from the configured secret.
///
/// Cheap to clone.
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<TokenKeysInner>,
}

struct TokenKeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl", &self.inner.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 30;

        Self {
            inner: Arc::new(TokenKeysInner {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
                validation,
                ttl: config.expiry,
            }),
        }
    }

    /// Sign a token for `user`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.sign(&Claims::for_user(user, self.inner.ttl))
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encode` if signing fails.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.inner.encoding)
            .map_err(TokenError::Encode)
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` or `TokenError::Invalid`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.inner.decoding, &self.inner.validation)?;
        data.claims.user_id()?;
        Ok(data.claims)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::DateTime;
    use folio_core::{Email, Username};
    use secrecy::SecretString;

    use super::*;

    fn keys(secret: &str) -> TokenKeys {
        TokenKeys::new(&JwtConfig {
            secret: SecretString::from(secret),
            expiry: Duration::from_secs(24 * 60 * 60),
        })
    }

    fn user(id: i32, role: UserRole) -> User {
        User {
            id: UserId::new(id),
            username: Username::parse("ada").unwrap(),
            email: Email::parse("ada@example.com").unwrap(),
            role,
            created_at: DateTime::from_timestamp(0, 0).unwrap(),
            updated_at: DateTime::from_timestamp(0, 0).unwrap(),
        }
    }

    const SECRET: &str = "b7Kq2vX9mP4wL8nR3tY6zC1dF5gH0jAe";

    #[test]
    fn test_issue_then_verify_same_user() {
        let keys = keys(SECRET);
        let token = keys.issue(&user(42, UserRole::Admin)).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), UserId::new(42));
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let keys = keys(SECRET);
        let now = Utc::now().timestamp();
        let token = keys
            .sign(&Claims {
                sub: "1".to_owned(),
                role: UserRole::User,
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert!(matches!(keys.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = keys(SECRET).issue(&user(1, UserRole::User)).unwrap();
        let other = keys("Zr8Yt2Wq6Ep0Lk4Mj9Nh3Bg7Vf1Cd5Xs");

        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            keys(SECRET).verify("not.a.jwt"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let keys = keys(SECRET);
        let now = Utc::now().timestamp();
        let token = keys
            .sign(&Claims {
                sub: "admin".to_owned(),
                role: UserRole::Admin,
                iat: now,
                exp: now + 60,
            })
            .unwrap();

        assert!(matches!(keys.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", keys(SECRET));
        assert!(!debug.contains(SECRET));
    }
}
