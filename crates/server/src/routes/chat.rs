//! Chat with the portfolio assistant.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::AppJson;
use crate::db::ChatRepository;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::ChatMessage;
use crate::state::AppState;

const MAX_MESSAGE_CHARS: usize = 4000;

/// Body of `POST /api/chat`.
///
/// Any `userId` sent by older clients is ignored; the owner is the caller.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// GET /api/chat
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ChatMessage>>> {
    let messages = ChatRepository::new(state.pool())
        .recent_for_user(user.id)
        .await?;
    Ok(Json(messages))
}

/// POST /api/chat
#[instrument(skip_all, fields(user_id))]
pub async fn send_message(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    AppJson(req): AppJson<ChatRequest>,
) -> Result<(StatusCode, Json<ChatResponse>)> {
    let Some(user) = user else {
        return Err(AppError::Unauthorized(
            "You need to login to have personal chat.".to_owned(),
        ));
    };
    tracing::Span::current().record("user_id", tracing::field::display(user.id));

    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message is required".to_owned()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::BadRequest(format!(
            "Message must be at most {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let response = state
        .gemini()
        .chat(message)
        .await
        .map_err(|e| AppError::upstream("Failed to get AI response", e))?;

    ChatRepository::new(state.pool())
        .create(user.id, message, &response)
        .await?;

    Ok((StatusCode::CREATED, Json(ChatResponse { response })))
}
