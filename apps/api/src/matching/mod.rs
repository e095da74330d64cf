// Opportunity matching: per-pair fit scoring and per-student ranking.
// Scoring is pure; all data access goes through the store traits.

pub mod fit_scoring;
pub mod handlers;
pub mod ranking;
