//! Axum route handlers for the Team API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::TeamStore;
use crate::team::allocator::{
    allocate_team, validate_team_request, TeamAssignment, TeamRoleRequirement,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TeamGenerationRequest {
    pub faculty_id: i64,
    pub title: String,
    pub required_roles: Vec<TeamRoleRequirement>,
}

#[derive(Debug, Serialize)]
pub struct TeamGenerationResponse {
    pub project_id: i64,
    pub title: String,
    pub team: Vec<TeamAssignment>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /team/auto-generate
///
/// Creates a project for the faculty member and staffs its roles greedily.
/// Unknown faculty is a 404; an empty role list or blank title is a 400.
pub async fn handle_auto_generate(
    State(state): State<AppState>,
    Json(request): Json<TeamGenerationRequest>,
) -> Result<Json<TeamGenerationResponse>, AppError> {
    if !state.store.faculty_exists(request.faculty_id).await? {
        return Err(AppError::NotFound(format!(
            "Faculty {} not found",
            request.faculty_id
        )));
    }

    validate_team_request(&request.title, &request.required_roles)?;

    let allocated = allocate_team(
        state.store.as_ref(),
        &request.title,
        request.faculty_id,
        &request.required_roles,
    )
    .await?;

    Ok(Json(TeamGenerationResponse {
        project_id: allocated.project.id,
        title: allocated.project.title,
        team: allocated.team,
    }))
}
