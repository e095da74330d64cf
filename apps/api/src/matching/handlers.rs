//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::matching::fit_scoring::MatchResult;
use crate::matching::ranking::match_student;
use crate::state::AppState;

/// GET /matching/:student_id
///
/// Scores every opportunity for the student and returns them best first.
pub async fn handle_get_matches(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<Vec<MatchResult>>, AppError> {
    let results = match_student(state.store.as_ref(), state.fit_scorer.as_ref(), student_id).await?;
    Ok(Json(results))
}
