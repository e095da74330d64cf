//! Skill identity and per-student proficiency profiles.
//!
//! Every skill comparison in the service goes through [`canonical_skill`], so
//! "Python", " python " and "PYTHON" are the same skill everywhere.

use std::collections::HashMap;

use serde::Serialize;

pub mod handlers;

pub type SkillId = i64;

pub const MIN_LEVEL: i32 = 1;
pub const MAX_LEVEL: i32 = 5;

/// Canonical, case-insensitive form of a skill name.
pub fn canonical_skill(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Canonicalizes a declared skill list, dropping repeats while keeping the
/// position of each first occurrence.
pub fn canonical_skill_list<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let canonical = canonical_skill(name.as_ref());
        if !out.contains(&canonical) {
            out.push(canonical);
        }
    }
    out
}

/// Mapping from canonical skill name to proficiency level (1–5).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentSkillProfile {
    levels: HashMap<String, i32>,
}

impl StudentSkillProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a skill level. A later entry for the same canonical name wins.
    pub fn insert(&mut self, skill: &str, level: i32) {
        self.levels.insert(canonical_skill(skill), level);
    }

    pub fn has(&self, skill: &str) -> bool {
        self.levels.contains_key(&canonical_skill(skill))
    }
}

impl<S: AsRef<str>> FromIterator<(S, i32)> for StudentSkillProfile {
    fn from_iter<I: IntoIterator<Item = (S, i32)>>(iter: I) -> Self {
        let mut profile = StudentSkillProfile::new();
        for (skill, level) in iter {
            profile.insert(skill.as_ref(), level);
        }
        profile
    }
}
