//! Axum route handlers for student skill holdings.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::skills::{SkillId, MAX_LEVEL, MIN_LEVEL};
use crate::state::AppState;
use crate::store::{ProfileStore, SkillCatalog, SkillUpsert};

#[derive(Debug, Deserialize)]
pub struct AddSkillRequest {
    pub student_id: i64,
    pub skill_name: String,
    pub level: i32,
}

#[derive(Debug, Serialize)]
pub struct AddSkillResponse {
    pub message: String,
    pub skill_id: SkillId,
    pub level: i32,
}

/// POST /student/add-skill
///
/// Resolves the skill in the shared catalog (creating it if new) and sets the
/// student's level, updating in place when the student already holds it.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(request): Json<AddSkillRequest>,
) -> Result<Json<AddSkillResponse>, AppError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&request.level) {
        return Err(AppError::Validation(format!(
            "level must be between {MIN_LEVEL} and {MAX_LEVEL}"
        )));
    }
    if request.skill_name.trim().is_empty() {
        return Err(AppError::Validation("skill_name cannot be empty".to_string()));
    }

    state
        .store
        .get_student(request.student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {} not found", request.student_id)))?;

    let skill_id = state.store.find_or_create_skill(&request.skill_name).await?;
    let outcome = state
        .store
        .upsert_student_skill(request.student_id, skill_id, request.level)
        .await?;

    let message = match outcome {
        SkillUpsert::Inserted => "Skill added",
        SkillUpsert::Updated => "Skill level updated",
    };

    Ok(Json(AddSkillResponse {
        message: message.to_string(),
        skill_id,
        level: request.level,
    }))
}
