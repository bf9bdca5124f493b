//! Public testimonials plus admin moderation.

use axum::{Json, extract::State, http::StatusCode};

use folio_core::TestimonialId;

use super::{AppJson, IdPath, MessageResponse};
use crate::db::{RepositoryError, TestimonialRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{NewTestimonial, Testimonial};
use crate::state::AppState;

/// Unknown ids are reported as a bad request here, unlike the admin routes.
fn invalid_request(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::BadRequest("Invalid request".to_owned()),
        other => AppError::Database(other),
    }
}

/// GET /api/testimonials
///
/// Only approved testimonials are ever listed here.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>> {
    let testimonials = TestimonialRepository::new(state.pool())
        .list_approved()
        .await?;
    Ok(Json(testimonials))
}

/// POST /api/testimonials
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>)> {
    let input = input.validated()?;
    let testimonial = TestimonialRepository::new(state.pool())
        .create(&input)
        .await?;

    tracing::info!(testimonial_id = %testimonial.id, "Testimonial submitted for review");
    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// PATCH /api/testimonials/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath<TestimonialId>,
) -> Result<Json<Testimonial>> {
    let testimonial = TestimonialRepository::new(state.pool())
        .approve(id)
        .await
        .map_err(invalid_request)?;

    tracing::info!(testimonial_id = %id, admin_id = %admin.id, "Testimonial approved");
    Ok(Json(testimonial))
}

/// DELETE /api/testimonials/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    IdPath(id): IdPath<TestimonialId>,
) -> Result<Json<MessageResponse>> {
    TestimonialRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(invalid_request)?;

    Ok(Json(MessageResponse::new("Deleted")))
}
