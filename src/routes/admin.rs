use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Nested under `/admin`. The guard's `/admin` rule redirects non-admins to
/// `/dashboard`; handlers check the role again and answer 403.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin
        // Team and student counts per course.
        .route("/", get(handlers::admin_overview))
}
