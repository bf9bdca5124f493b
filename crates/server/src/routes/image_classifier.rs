//! Image classification via the vision model.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use folio_core::{ImageError, InlineImage};

use super::AppJson;
use crate::db::ClassificationRepository;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::ImageClassification;
use crate::state::AppState;

/// Body of `POST /api/image-classifier`.
#[derive(Debug, Default, Deserialize)]
pub struct ClassifyRequest {
    /// Data URL or bare base64.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub result: String,
}

/// GET /api/image-classifier
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ImageClassification>>> {
    let rows = ClassificationRepository::new(state.pool())
        .recent_for_user(user.id)
        .await?;
    Ok(Json(rows))
}

/// POST /api/image-classifier
///
/// The image is checked before anything is sent upstream: a missing or
/// non-image payload is a 400 and Gemini is never called.
#[instrument(skip_all, fields(user_id))]
pub async fn classify(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    AppJson(req): AppJson<ClassifyRequest>,
) -> Result<(StatusCode, Json<ClassifyResponse>)> {
    if let Some(user) = &user {
        tracing::Span::current().record("user_id", tracing::field::display(user.id));
    }

    let image = InlineImage::parse(req.image.as_deref().unwrap_or_default()).map_err(|e| {
        match e {
            ImageError::Missing => AppError::BadRequest("Image is required".to_owned()),
            other => {
                tracing::debug!(error = %other, "Rejected image payload");
                AppError::BadRequest("Invalid image".to_owned())
            }
        }
    })?;

    let result = state
        .gemini()
        .classify_image(&image)
        .await
        .map_err(|e| AppError::upstream("Failed to classify image", e))?;

    ClassificationRepository::new(state.pool())
        .create(user.map(|u| u.id), &result)
        .await?;

    Ok((StatusCode::CREATED, Json(ClassifyResponse { result })))
}
