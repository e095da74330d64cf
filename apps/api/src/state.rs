use std::sync::Arc;

use crate::matching::fit_scoring::FitScorer;
use crate::store::CampusStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Collaborator backend. `PgStore` in production.
    pub store: Arc<dyn CampusStore>,
    /// Pluggable fit scorer. Default: WeightedFitScorer.
    pub fit_scorer: Arc<dyn FitScorer>,
}
