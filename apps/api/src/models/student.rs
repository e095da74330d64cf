use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub cgpa: f64,
}

/// A student holding a given skill, as returned by the candidate query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub student_id: i64,
    pub user_id: i64,
    pub student_name: String,
    pub level: i32,
}
