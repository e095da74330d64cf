//! Collaborator interfaces the matching and team engines read from and write to.
//!
//! The engines never touch a connection directly: they receive a handle that
//! implements the traits they need. `PgStore` is the production backend;
//! `MemoryStore` backs the unit tests.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::models::opportunity::Opportunity;
use crate::models::project::Project;
use crate::models::student::{Candidate, Student};
use crate::skills::{SkillId, StudentSkillProfile};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Outcome of setting a student's level for a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillUpsert {
    Inserted,
    Updated,
}

/// Read access to students, opportunities, and skill holdings.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_student(&self, student_id: i64) -> Result<Option<Student>, AppError>;
    async fn user_exists(&self, user_id: i64) -> Result<bool, AppError>;
    async fn get_student_skill_profile(
        &self,
        student_id: i64,
    ) -> Result<StudentSkillProfile, AppError>;
    /// All opportunities, in id order.
    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, AppError>;
    /// Required skill names in the opportunity's declared order.
    async fn get_opportunity_required_skills(
        &self,
        opportunity_id: i64,
    ) -> Result<Vec<String>, AppError>;
    async fn upsert_student_skill(
        &self,
        student_id: i64,
        skill_id: SkillId,
        level: i32,
    ) -> Result<SkillUpsert, AppError>;
}

/// The shared skill catalog.
///
/// `find_or_create_skill` must be idempotent and case-insensitive even when
/// two callers race on the same new name.
#[async_trait]
pub trait SkillCatalog: Send + Sync {
    async fn find_or_create_skill(&self, name: &str) -> Result<SkillId, AppError>;
}

/// Projects and their team membership.
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn faculty_exists(&self, faculty_id: i64) -> Result<bool, AppError>;
    async fn create_project(&self, title: &str, faculty_id: i64) -> Result<Project, AppError>;
    /// Students holding `skill_id`, minus `exclude`, ordered by level
    /// descending then student id ascending.
    async fn find_candidates_for_skill(
        &self,
        skill_id: SkillId,
        exclude: &HashSet<i64>,
    ) -> Result<Vec<Candidate>, AppError>;
    async fn is_student_on_project(&self, project_id: i64, student_id: i64)
        -> Result<bool, AppError>;
    async fn record_team_assignment(
        &self,
        project_id: i64,
        student_id: i64,
        role: &str,
    ) -> Result<(), AppError>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn emit_notification(&self, user_id: i64, message: &str) -> Result<(), AppError>;
    /// Newest first.
    async fn list_notifications(&self, user_id: i64) -> Result<Vec<NotificationRow>, AppError>;
}

/// Everything the HTTP layer needs from one backend.
pub trait CampusStore: ProfileStore + SkillCatalog + TeamStore + Notifier {}

impl<T> CampusStore for T where T: ProfileStore + SkillCatalog + TeamStore + Notifier {}
