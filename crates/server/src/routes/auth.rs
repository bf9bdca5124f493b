//! Registration, login and the current-user endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::AppJson;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::AuthService;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: User,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/auth/register
///
/// Every failure, a taken username or email included, is a 400
/// "Registration failed".
#[instrument(skip_all, fields(username = %req.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let user = AuthService::new(state.pool())
        .register(&req.username, &req.email, &req.password)
        .await
        .map_err(AppError::Registration)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered",
            user,
        }),
    ))
}

/// POST /api/auth/login
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let user = AuthService::new(state.pool())
        .login(&req.email, &req.password)
        .await
        .map_err(AppError::login)?;

    let token = state
        .tokens()
        .issue(&user)
        .map_err(|e| AppError::LoginFailed(e.to_string()))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(TokenResponse { token }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<User>> {
    let user = AuthService::new(state.pool()).get_user(current.id).await?;
    Ok(Json(user))
}
