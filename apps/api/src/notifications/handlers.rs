use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::state::AppState;
use crate::store::{Notifier, ProfileStore};

#[derive(Debug, Serialize)]
pub struct NotificationOut {
    pub id: i64,
    pub message: String,
    pub is_read: bool,
}

impl From<NotificationRow> for NotificationOut {
    fn from(row: NotificationRow) -> Self {
        NotificationOut {
            id: row.id,
            message: row.message,
            is_read: row.is_read,
        }
    }
}

/// GET /notifications/:user_id
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<NotificationOut>>, AppError> {
    if !state.store.user_exists(user_id).await? {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }

    let rows = state.store.list_notifications(user_id).await?;
    Ok(Json(rows.into_iter().map(NotificationOut::from).collect()))
}
