use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Pages reachable without a session. The access guard lets these through for
/// anonymous visitors, and sends signed-in visitors on `/`, `/auth/login` and
/// `/auth/register` to their dashboard before the handler runs.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /api/health
        // Liveness probe. Under `/api`, so the guard is never mounted on it.
        .route("/api/health", get(handlers::health))
        // GET /
        // Landing page with the course catalog.
        .route("/", get(handlers::landing))
        // GET /auth/login?next=...
        .route("/auth/login", get(handlers::login_page))
        // GET /auth/register
        .route("/auth/register", get(handlers::register_page))
}
