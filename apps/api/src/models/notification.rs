use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
