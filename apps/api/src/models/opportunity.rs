use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The slice of an opportunity the fit scorer reads. Required skills are
/// fetched separately so their declaration order is preserved.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Opportunity {
    pub id: i64,
    pub title: String,
    pub min_cgpa: f64,
}
