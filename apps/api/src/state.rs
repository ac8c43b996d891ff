use std::sync::Arc;

use sqlx::PgPool;

use crate::jobs::matching::MatchScorer;
use crate::jobs::source::JobSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Posting source. Default: the built-in static catalog; a live board
    /// integration slots in here.
    pub jobs: Arc<dyn JobSource>,
    /// Pluggable match scorer. Default: SkillOverlapScorer.
    pub matcher: Arc<dyn MatchScorer>,
}
