//! Contact form.

use axum::{Json, extract::State, http::StatusCode};

use super::{AppJson, MessageResponse};
use crate::db::ContactRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Contact, NewContact};
use crate::state::AppState;

/// POST /api/contact
pub async fn submit(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewContact>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let input = input.validated()?;
    let contact = ContactRepository::new(state.pool()).create(&input).await?;

    tracing::info!(contact_id = %contact.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Message received"))))
}

/// GET /api/contact
///
/// Any signed-in user may read submissions; deleting them is admin-only.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
) -> Result<Json<Vec<Contact>>> {
    let contacts = ContactRepository::new(state.pool()).list().await?;
    Ok(Json(contacts))
}
