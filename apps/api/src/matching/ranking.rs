use crate::errors::AppError;
use crate::matching::fit_scoring::{FitScorer, MatchResult};
use crate::store::ProfileStore;

/// Sorts by fit score, best first. `sort_by` is stable, so equal scores keep
/// the order the opportunities were enumerated in.
pub fn rank_matches(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(|a, b| b.fit_score.total_cmp(&a.fit_score));
    results
}

/// Scores every opportunity for one student and returns them ranked.
///
/// The student's skill profile is loaded once per call and shared by every
/// opportunity in the pass.
pub async fn match_student<S>(
    store: &S,
    scorer: &dyn FitScorer,
    student_id: i64,
) -> Result<Vec<MatchResult>, AppError>
where
    S: ProfileStore + ?Sized,
{
    let student = store
        .get_student(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {student_id} not found")))?;

    let opportunities = store.list_opportunities().await?;
    if opportunities.is_empty() {
        return Ok(Vec::new());
    }

    let profile = store.get_student_skill_profile(student.id).await?;

    let mut results = Vec::with_capacity(opportunities.len());
    for opportunity in &opportunities {
        let required = store.get_opportunity_required_skills(opportunity.id).await?;
        results.push(scorer.score(&student, opportunity, &required, &profile));
    }

    Ok(rank_matches(results))
}
