pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::notifications::handlers as notifications;
use crate::skills::handlers as skills;
use crate::state::AppState;
use crate::team::handlers as team;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Matching API
        .route("/matching/:student_id", get(matching::handle_get_matches))
        // Team API
        .route("/team/auto-generate", post(team::handle_auto_generate))
        // Student skills
        .route("/student/add-skill", post(skills::handle_add_skill))
        // Notifications
        .route(
            "/notifications/:user_id",
            get(notifications::handle_list_notifications),
        )
        .with_state(state)
}
