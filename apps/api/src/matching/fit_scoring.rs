//! Fit scoring: pluggable, trait-based scorer measuring how well a student
//! fits one opportunity.
//!
//! Default: `WeightedFitScorer` (skill overlap blended with a CGPA gate).
//! `AppState` holds an `Arc<dyn FitScorer>`, chosen at startup.

use serde::{Deserialize, Serialize};

use crate::models::opportunity::Opportunity;
use crate::models::student::Student;
use crate::skills::{canonical_skill_list, StudentSkillProfile};

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Fit of one student against one opportunity. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub opportunity_id: i64,
    #[serde(rename = "opportunity")]
    pub opportunity_title: String,
    pub fit_score: f64, // 0 – 100, two decimals
    pub eligible: bool,
    pub missing_skills: Vec<String>, // canonical names, declared order
    pub reason: Option<String>,      // present only when ineligible
}

/// Blend weights for the two fit dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitWeights {
    pub skill: f64,
    pub cgpa: f64,
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            skill: 0.7,
            cgpa: 0.3,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the ranking
/// code or the handlers. Scoring is pure: no I/O, no shared state.
pub trait FitScorer: Send + Sync {
    fn score(
        &self,
        student: &Student,
        opportunity: &Opportunity,
        required_skills: &[String],
        profile: &StudentSkillProfile,
    ) -> MatchResult;
}

/// Weighted skill-overlap + CGPA scorer.
///
/// Algorithm:
/// 1. skill_match = matched / required (1.0 when nothing is required)
/// 2. cgpa_match  = 1 if cgpa ≥ min_cgpa else 0
/// 3. fit_score   = (w_skill × skill_match + w_cgpa × cgpa_match) × 100,
///    rounded to 2 decimals and clamped to [0, 100]
/// 4. eligible    = cgpa_match == 1 && skill_match > 0
#[derive(Debug, Clone, Default)]
pub struct WeightedFitScorer {
    pub weights: FitWeights,
}

impl FitScorer for WeightedFitScorer {
    fn score(
        &self,
        student: &Student,
        opportunity: &Opportunity,
        required_skills: &[String],
        profile: &StudentSkillProfile,
    ) -> MatchResult {
        compute_fit(student, opportunity, required_skills, profile, &self.weights)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core fit algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_fit(
    student: &Student,
    opportunity: &Opportunity,
    required_skills: &[String],
    profile: &StudentSkillProfile,
    weights: &FitWeights,
) -> MatchResult {
    let required = canonical_skill_list(required_skills);

    let (skill_match, missing_skills) = if required.is_empty() {
        (1.0, Vec::new())
    } else {
        let missing: Vec<String> = required
            .iter()
            .filter(|skill| !profile.has(skill))
            .cloned()
            .collect();
        let matched = required.len() - missing.len();
        (matched as f64 / required.len() as f64, missing)
    };

    let cgpa_met = student.cgpa >= opportunity.min_cgpa;
    let cgpa_match = if cgpa_met { 1.0 } else { 0.0 };

    let blended = weights.skill * skill_match + weights.cgpa * cgpa_match;
    let fit_score = round2(blended * 100.0).clamp(0.0, 100.0);

    let eligible = cgpa_met && skill_match > 0.0;
    let reason = if eligible {
        None
    } else {
        Some(build_reason(
            student,
            opportunity,
            cgpa_met,
            skill_match,
            &missing_skills,
        ))
    };

    MatchResult {
        opportunity_id: opportunity.id,
        opportunity_title: opportunity.title.clone(),
        fit_score,
        eligible,
        missing_skills,
        reason,
    }
}

/// Joins the ineligibility causes with "; ", CGPA first.
fn build_reason(
    student: &Student,
    opportunity: &Opportunity,
    cgpa_met: bool,
    skill_match: f64,
    missing_skills: &[String],
) -> String {
    let mut reasons = Vec::new();

    if !cgpa_met {
        reasons.push(format!(
            "CGPA requirement not met (required: {}, student: {})",
            format_decimal(opportunity.min_cgpa),
            format_decimal(student.cgpa)
        ));
    }

    if skill_match == 0.0 {
        reasons.push("No matching skills".to_string());
    } else if !missing_skills.is_empty() {
        reasons.push(format!(
            "Missing required skills: {}",
            missing_skills.join(", ")
        ));
    }

    reasons.join("; ")
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole numbers keep one decimal ("7.0"), others print as-is ("8.25").
fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
