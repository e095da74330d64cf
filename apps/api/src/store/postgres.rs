use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::models::opportunity::Opportunity;
use crate::models::project::Project;
use crate::models::student::{Candidate, Student};
use crate::skills::{SkillId, StudentSkillProfile};
use crate::store::{Notifier, ProfileStore, SkillCatalog, SkillUpsert, TeamStore};

/// PostgreSQL-backed implementation of every collaborator trait.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    async fn lookup_skill(&self, name: &str) -> Result<Option<SkillId>, AppError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT id FROM skills WHERE lower(name) = lower($1)")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?,
        )
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn get_student(&self, student_id: i64) -> Result<Option<Student>, AppError> {
        Ok(sqlx::query_as::<_, Student>(
            "SELECT id, user_id, name, cgpa FROM students WHERE id = $1",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn user_exists(&self, user_id: i64) -> Result<bool, AppError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn get_student_skill_profile(
        &self,
        student_id: i64,
    ) -> Result<StudentSkillProfile, AppError> {
        let rows = sqlx::query_as::<_, (String, i32)>(
            r#"
            SELECT s.name, ss.level
            FROM student_skills ss
            JOIN skills s ON s.id = ss.skill_id
            WHERE ss.student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, AppError> {
        Ok(sqlx::query_as::<_, Opportunity>(
            "SELECT id, title, min_cgpa FROM opportunities ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn get_opportunity_required_skills(
        &self,
        opportunity_id: i64,
    ) -> Result<Vec<String>, AppError> {
        Ok(sqlx::query_scalar::<_, String>(
            r#"
            SELECT s.name
            FROM opportunity_skills os
            JOIN skills s ON s.id = os.skill_id
            WHERE os.opportunity_id = $1
            ORDER BY os.position, os.id
            "#,
        )
        .bind(opportunity_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn upsert_student_skill(
        &self,
        student_id: i64,
        skill_id: SkillId,
        level: i32,
    ) -> Result<SkillUpsert, AppError> {
        // xmax is 0 only for a freshly inserted tuple.
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO student_skills (student_id, skill_id, level)
            VALUES ($1, $2, $3)
            ON CONFLICT (student_id, skill_id) DO UPDATE SET level = EXCLUDED.level
            RETURNING (xmax = 0)
            "#,
        )
        .bind(student_id)
        .bind(skill_id)
        .bind(level)
        .fetch_one(&self.pool)
        .await?;

        Ok(if inserted {
            SkillUpsert::Inserted
        } else {
            SkillUpsert::Updated
        })
    }
}

#[async_trait]
impl SkillCatalog for PgStore {
    async fn find_or_create_skill(&self, name: &str) -> Result<SkillId, AppError> {
        let name = name.trim();
        if let Some(id) = self.lookup_skill(name).await? {
            return Ok(id);
        }

        let created = sqlx::query_scalar::<_, i64>(
            "INSERT INTO skills (name) VALUES ($1) ON CONFLICT ((lower(name))) DO NOTHING RETURNING id",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        match created {
            Some(id) => {
                debug!("Created skill '{name}' ({id})");
                Ok(id)
            }
            // Lost the race to a concurrent insert; the row exists now.
            None => self.lookup_skill(name).await?.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("skill '{name}' vanished after conflict"))
            }),
        }
    }
}

#[async_trait]
impl TeamStore for PgStore {
    async fn faculty_exists(&self, faculty_id: i64) -> Result<bool, AppError> {
        Ok(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM faculty WHERE id = $1)")
                .bind(faculty_id)
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn create_project(&self, title: &str, faculty_id: i64) -> Result<Project, AppError> {
        Ok(sqlx::query_as::<_, Project>(
            "INSERT INTO projects (title, faculty_id) VALUES ($1, $2) RETURNING id, title, faculty_id",
        )
        .bind(title)
        .bind(faculty_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn find_candidates_for_skill(
        &self,
        skill_id: SkillId,
        exclude: &HashSet<i64>,
    ) -> Result<Vec<Candidate>, AppError> {
        let exclude: Vec<i64> = exclude.iter().copied().collect();
        Ok(sqlx::query_as::<_, Candidate>(
            r#"
            SELECT st.id AS student_id, st.user_id, st.name AS student_name, ss.level
            FROM students st
            JOIN student_skills ss ON ss.student_id = st.id
            WHERE ss.skill_id = $1 AND NOT (st.id = ANY($2))
            ORDER BY ss.level DESC, st.id ASC
            "#,
        )
        .bind(skill_id)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn is_student_on_project(
        &self,
        project_id: i64,
        student_id: i64,
    ) -> Result<bool, AppError> {
        Ok(sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM team WHERE project_id = $1 AND student_id = $2)",
        )
        .bind(project_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn record_team_assignment(
        &self,
        project_id: i64,
        student_id: i64,
        role: &str,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO team (project_id, student_id, role) VALUES ($1, $2, $3)")
            .bind(project_id)
            .bind(student_id)
            .bind(role)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for PgStore {
    async fn emit_notification(&self, user_id: i64, message: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO notifications (user_id, message) VALUES ($1, $2)")
            .bind(user_id)
            .bind(message)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_notifications(&self, user_id: i64) -> Result<Vec<NotificationRow>, AppError> {
        Ok(sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, user_id, message, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
