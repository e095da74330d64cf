//! In-memory collaborator backend for unit tests.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::models::opportunity::Opportunity;
use crate::models::project::Project;
use crate::models::student::{Candidate, Student};
use crate::skills::{canonical_skill, SkillId, StudentSkillProfile};
use crate::store::{Notifier, ProfileStore, SkillCatalog, SkillUpsert, TeamStore};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeSet<i64>,
    students: BTreeMap<i64, Student>,
    faculty: BTreeSet<i64>,
    skills: Vec<String>,
    student_skills: BTreeMap<(i64, SkillId), i32>,
    opportunities: Vec<(Opportunity, Vec<String>)>,
    projects: Vec<Project>,
    team: Vec<(i64, i64, String)>,
    notifications: Vec<NotificationRow>,
    fail_notifications: bool,
}

impl Inner {
    fn skill_id(&self, name: &str) -> Option<SkillId> {
        let wanted = canonical_skill(name);
        self.skills
            .iter()
            .position(|s| canonical_skill(s) == wanted)
            .map(|idx| idx as SkillId + 1)
    }

    fn ensure_skill(&mut self, name: &str) -> SkillId {
        if let Some(id) = self.skill_id(name) {
            return id;
        }
        self.skills.push(name.trim().to_string());
        self.skills.len() as SkillId
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user_id: i64) {
        self.inner.lock().unwrap().users.insert(user_id);
    }

    /// Adds a student (and its user) with the given skill levels.
    pub fn add_student(&self, id: i64, name: &str, cgpa: f64, skills: &[(&str, i32)]) {
        let mut inner = self.inner.lock().unwrap();
        let user_id = 1000 + id;
        inner.users.insert(user_id);
        inner.students.insert(
            id,
            Student {
                id,
                user_id,
                name: name.to_string(),
                cgpa,
            },
        );
        for (skill, level) in skills {
            let skill_id = inner.ensure_skill(skill);
            inner.student_skills.insert((id, skill_id), *level);
        }
    }

    pub fn add_faculty(&self, faculty_id: i64) {
        self.inner.lock().unwrap().faculty.insert(faculty_id);
    }

    pub fn add_opportunity(&self, id: i64, title: &str, min_cgpa: f64, required: &[&str]) {
        let mut inner = self.inner.lock().unwrap();
        for skill in required {
            inner.ensure_skill(skill);
        }
        inner.opportunities.push((
            Opportunity {
                id,
                title: title.to_string(),
                min_cgpa,
            },
            required.iter().map(|s| s.to_string()).collect(),
        ));
    }

    pub fn add_team_member(&self, project_id: i64, student_id: i64, role: &str) {
        self.inner
            .lock()
            .unwrap()
            .team
            .push((project_id, student_id, role.to_string()));
    }

    pub fn fail_notifications(&self) {
        self.inner.lock().unwrap().fail_notifications = true;
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.inner.lock().unwrap().skills.clone()
    }

    pub fn team_rows(&self) -> Vec<(i64, i64, String)> {
        self.inner.lock().unwrap().team.clone()
    }

    pub fn notifications(&self) -> Vec<NotificationRow> {
        self.inner.lock().unwrap().notifications.clone()
    }

    pub fn project_count(&self) -> usize {
        self.inner.lock().unwrap().projects.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_student(&self, student_id: i64) -> Result<Option<Student>, AppError> {
        Ok(self.inner.lock().unwrap().students.get(&student_id).cloned())
    }

    async fn user_exists(&self, user_id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().users.contains(&user_id))
    }

    async fn get_student_skill_profile(
        &self,
        student_id: i64,
    ) -> Result<StudentSkillProfile, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .student_skills
            .iter()
            .filter(|((sid, _), _)| *sid == student_id)
            .map(|((_, skill_id), level)| {
                (inner.skills[(*skill_id - 1) as usize].clone(), *level)
            })
            .collect())
    }

    async fn list_opportunities(&self) -> Result<Vec<Opportunity>, AppError> {
        let mut opportunities: Vec<Opportunity> = self
            .inner
            .lock()
            .unwrap()
            .opportunities
            .iter()
            .map(|(o, _)| o.clone())
            .collect();
        opportunities.sort_by_key(|o| o.id);
        Ok(opportunities)
    }

    async fn get_opportunity_required_skills(
        &self,
        opportunity_id: i64,
    ) -> Result<Vec<String>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .opportunities
            .iter()
            .find(|(o, _)| o.id == opportunity_id)
            .map(|(_, skills)| skills.clone())
            .unwrap_or_default())
    }

    async fn upsert_student_skill(
        &self,
        student_id: i64,
        skill_id: SkillId,
        level: i32,
    ) -> Result<SkillUpsert, AppError> {
        let previous = self
            .inner
            .lock()
            .unwrap()
            .student_skills
            .insert((student_id, skill_id), level);
        Ok(match previous {
            Some(_) => SkillUpsert::Updated,
            None => SkillUpsert::Inserted,
        })
    }
}

#[async_trait]
impl SkillCatalog for MemoryStore {
    async fn find_or_create_skill(&self, name: &str) -> Result<SkillId, AppError> {
        Ok(self.inner.lock().unwrap().ensure_skill(name))
    }
}

#[async_trait]
impl TeamStore for MemoryStore {
    async fn faculty_exists(&self, faculty_id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().faculty.contains(&faculty_id))
    }

    async fn create_project(&self, title: &str, faculty_id: i64) -> Result<Project, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let project = Project {
            id: inner.projects.len() as i64 + 1,
            title: title.to_string(),
            faculty_id,
        };
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn find_candidates_for_skill(
        &self,
        skill_id: SkillId,
        exclude: &HashSet<i64>,
    ) -> Result<Vec<Candidate>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut candidates: Vec<Candidate> = inner
            .student_skills
            .iter()
            .filter(|((sid, skid), _)| *skid == skill_id && !exclude.contains(sid))
            .filter_map(|((sid, _), level)| {
                inner.students.get(sid).map(|s| Candidate {
                    student_id: s.id,
                    user_id: s.user_id,
                    student_name: s.name.clone(),
                    level: *level,
                })
            })
            .collect();
        candidates.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });
        Ok(candidates)
    }

    async fn is_student_on_project(
        &self,
        project_id: i64,
        student_id: i64,
    ) -> Result<bool, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .team
            .iter()
            .any(|(pid, sid, _)| *pid == project_id && *sid == student_id))
    }

    async fn record_team_assignment(
        &self,
        project_id: i64,
        student_id: i64,
        role: &str,
    ) -> Result<(), AppError> {
        self.add_team_member(project_id, student_id, role);
        Ok(())
    }
}

#[async_trait]
impl Notifier for MemoryStore {
    async fn emit_notification(&self, user_id: i64, message: &str) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_notifications {
            return Err(AppError::Internal(anyhow::anyhow!(
                "notification store unavailable"
            )));
        }
        let id = inner.notifications.len() as i64 + 1;
        inner.notifications.push(NotificationRow {
            id,
            user_id,
            message: message.to_string(),
            is_read: false,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn list_notifications(&self, user_id: i64) -> Result<Vec<NotificationRow>, AppError> {
        let mut rows: Vec<NotificationRow> = self
            .inner
            .lock()
            .unwrap()
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }
}
