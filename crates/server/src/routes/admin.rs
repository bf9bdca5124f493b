//! Admin listing and deletion.
//!
//! Every handler takes [`RequireAdmin`]: 401 without a valid token, 403 for
//! a non-admin one. Deleting an unknown id is a 404.

use axum::{Json, extract::State};

use folio_core::{ContactId, ProjectId, TestimonialId, UserId};

use super::{IdPath, MessageResponse};
use crate::db::{ContactRepository, ProjectRepository, TestimonialRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Contact, Project, Testimonial, User};
use crate::state::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<User>>> {
    Ok(Json(UserRepository::new(state.pool()).list().await?))
}

/// DELETE /api/admin/users/{id}
///
/// Admins cannot delete themselves, so there is always one left.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath<UserId>,
) -> Result<Json<MessageResponse>> {
    if id == admin.id {
        return Err(AppError::BadRequest(
            "Admins cannot delete their own account".to_owned(),
        ));
    }
    UserRepository::new(state.pool()).delete(id).await?;

    tracing::info!(user_id = %id, admin_id = %admin.id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

pub async fn list_projects(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<Project>>> {
    Ok(Json(ProjectRepository::new(state.pool()).list().await?))
}

pub async fn delete_project(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath<ProjectId>,
) -> Result<Json<MessageResponse>> {
    ProjectRepository::new(state.pool()).delete(id).await?;

    tracing::info!(project_id = %id, admin_id = %admin.id, "Project deleted");
    Ok(Json(MessageResponse::new("Project deleted")))
}

/// GET /api/admin/testimonials
///
/// Includes testimonials still awaiting approval.
pub async fn list_testimonials(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<Testimonial>>> {
    Ok(Json(TestimonialRepository::new(state.pool()).list_all().await?))
}

pub async fn delete_testimonial(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath<TestimonialId>,
) -> Result<Json<MessageResponse>> {
    TestimonialRepository::new(state.pool()).delete(id).await?;

    tracing::info!(testimonial_id = %id, admin_id = %admin.id, "Testimonial deleted");
    Ok(Json(MessageResponse::new("Testimonial deleted")))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<Json<Vec<Contact>>> {
    Ok(Json(ContactRepository::new(state.pool()).list().await?))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath<ContactId>,
) -> Result<Json<MessageResponse>> {
    ContactRepository::new(state.pool()).delete(id).await?;

    tracing::info!(contact_id = %id, admin_id = %admin.id, "Contact deleted");
    Ok(Json(MessageResponse::new("Contact deleted")))
}
