//! Greedy team builder.
//!
//! Roles are filled strictly in the order supplied: each role takes the
//! highest-level holder of its skill who is not yet on this run's team, so
//! earlier roles get first pick of a shared top candidate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::project::Project;
use crate::models::student::Candidate;
use crate::store::{Notifier, SkillCatalog, TeamStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRoleRequirement {
    pub role: String,
    pub skill_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub student_id: i64,
    pub role: String,
    pub student_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocatedTeam {
    pub project: Project,
    /// One entry per filled role, in role order. Unfilled roles are absent.
    pub team: Vec<TeamAssignment>,
}

/// Caller-input checks that must pass before anything is written.
pub fn validate_team_request(
    title: &str,
    roles: &[TeamRoleRequirement],
) -> Result<(), AppError> {
    if roles.is_empty() {
        return Err(AppError::Validation(
            "At least one required role is needed".to_string(),
        ));
    }
    if title.trim().is_empty() {
        return Err(AppError::Validation("Project title is required".to_string()));
    }
    Ok(())
}

pub fn assignment_message(project_title: &str, role: &str) -> String {
    format!("You have been added to project '{project_title}' as {role}")
}

/// Creates the project and fills each role with the best available student.
///
/// A role with no eligible candidate, or whose top candidate is already a
/// member of the project, is skipped. Collaborator errors abort the run and
/// propagate unchanged; nothing already written is rolled back here.
pub async fn allocate_team<S>(
    store: &S,
    project_title: &str,
    faculty_id: i64,
    roles: &[TeamRoleRequirement],
) -> Result<AllocatedTeam, AppError>
where
    S: SkillCatalog + TeamStore + Notifier + ?Sized,
{
    validate_team_request(project_title, roles)?;

    let project = store.create_project(project_title, faculty_id).await?;
    info!(
        "Allocating {} role(s) for project {} ('{}')",
        roles.len(),
        project.id,
        project.title
    );

    let mut assigned: HashSet<i64> = HashSet::new();
    let mut team = Vec::with_capacity(roles.len());

    for requirement in roles {
        if let Some(assignment) = fill_role(store, &project, requirement, &mut assigned).await? {
            team.push(assignment);
        }
    }

    info!(
        "Project {} staffed {}/{} role(s)",
        project.id,
        team.len(),
        roles.len()
    );

    Ok(AllocatedTeam { project, team })
}

async fn fill_role<S>(
    store: &S,
    project: &Project,
    requirement: &TeamRoleRequirement,
    assigned: &mut HashSet<i64>,
) -> Result<Option<TeamAssignment>, AppError>
where
    S: SkillCatalog + TeamStore + Notifier + ?Sized,
{
    let skill_id = store.find_or_create_skill(&requirement.skill_name).await?;

    let candidates = store.find_candidates_for_skill(skill_id, assigned).await?;
    let Some(Candidate {
        student_id,
        user_id,
        student_name,
        level,
    }) = pick_candidate(candidates, assigned)
    else {
        debug!(
            "No candidate for role '{}' (skill '{}'); leaving it unfilled",
            requirement.role, requirement.skill_name
        );
        return Ok(None);
    };

    if store.is_student_on_project(project.id, student_id).await? {
        debug!(
            "Student {student_id} already on project {}; skipping role '{}'",
            project.id, requirement.role
        );
        return Ok(None);
    }

    store
        .record_team_assignment(project.id, student_id, &requirement.role)
        .await?;
    assigned.insert(student_id);

    store
        .emit_notification(user_id, &assignment_message(&project.title, &requirement.role))
        .await?;

    info!(
        "Assigned student {student_id} (level {level}) to role '{}' on project {}",
        requirement.role, project.id
    );

    Ok(Some(TeamAssignment {
        student_id,
        role: requirement.role.clone(),
        student_name,
    }))
}

/// First candidate not already on this run's team. The store is asked to
/// exclude them; this keeps the no-double-booking rule local as well.
fn pick_candidate(candidates: Vec<Candidate>, assigned: &HashSet<i64>) -> Option<Candidate> {
    candidates
        .into_iter()
        .find(|c| !assigned.contains(&c.student_id))
}
