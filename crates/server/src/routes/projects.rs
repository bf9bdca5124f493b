//! Project listing and creation.

use axum::{Json, extract::State, http::StatusCode};

use super::AppJson;
use crate::db::ProjectRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{NewProject, Project};
use crate::state::AppState;

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Project>>> {
    let projects = ProjectRepository::new(state.pool()).list().await?;
    Ok(Json(projects))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<NewProject>,
) -> Result<(StatusCode, Json<Project>)> {
    let input = input.validated()?;
    let project = ProjectRepository::new(state.pool()).create(&input).await?;

    tracing::info!(project_id = %project.id, admin_id = %admin.id, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}
