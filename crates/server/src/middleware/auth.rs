//! Bearer-token extractors.
//!
//! Tokens are read from `Authorization: Bearer <jwt>` and verified with the
//! shared [`TokenKeys`]. The verified identity is cached in request
//! extensions so stacking extractors does not re-verify.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use folio_core::{UserId, UserRole};

use crate::error::{AppError, set_sentry_user};
use crate::services::TokenKeys;

/// The caller as identified by their token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: UserRole,
}

impl CurrentUser {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn me(RequireAuth(user): RequireAuth) -> String {
///     user.id.to_string()
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Extractor that requires a valid bearer token with the admin role.
///
/// Rejects with 401 when the token is missing or invalid and 403 when the
/// caller is not an admin.
pub struct RequireAdmin(pub CurrentUser);

/// Extractor that identifies the caller when possible.
///
/// A missing, malformed, or expired token yields `None` rather than a
/// rejection.
pub struct OptionalAuth(pub Option<CurrentUser>);

enum BearerError {
    Missing,
    Malformed,
}

fn bearer_token(parts: &Parts) -> Result<&str, BearerError> {
    let value = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(BearerError::Missing)?
        .to_str()
        .map_err(|_| BearerError::Malformed)?;

    let (scheme, token) = value.split_once(' ').ok_or(BearerError::Malformed)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(BearerError::Malformed);
    }
    Ok(token)
}

fn authenticate(parts: &mut Parts, keys: &TokenKeys) -> Result<CurrentUser, AppError> {
    if let Some(user) = parts.extensions.get::<CurrentUser>() {
        return Ok(*user);
    }

    let token = bearer_token(parts).map_err(|e| match e {
        BearerError::Missing => AppError::Unauthorized("Authentication required".to_owned()),
        BearerError::Malformed => {
            AppError::Unauthorized("Authorization header must be 'Bearer <token>'".to_owned())
        }
    })?;

    let claims = keys.verify(token)?;
    let user = CurrentUser {
        id: claims.user_id()?,
        role: claims.role,
    };

    set_sentry_user(&user.id);
    parts.extensions.insert(user);
    Ok(user)
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);
        authenticate(parts, &keys).map(Self)
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = TokenKeys::from_ref(state);
        let user = authenticate(parts, &keys)?;
        if !user.is_admin() {
            tracing::warn!(user_id = %user.id, path = %parts.uri.path(), "Non-admin denied");
            return Err(AppError::Forbidden("Admin access required".to_owned()));
        }
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
    TokenKeys: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if matches!(bearer_token(parts), Err(BearerError::Missing)) {
            return Ok(Self(None));
        }

        let keys = TokenKeys::from_ref(state);
        match authenticate(parts, &keys) {
            Ok(user) => Ok(Self(Some(user))),
            Err(err) => {
                tracing::debug!(error = %err, "Ignoring unusable bearer token");
                Ok(Self(None))
            }
        }
    }
}
