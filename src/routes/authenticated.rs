use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Pages for any signed-in visitor. Anonymous requests never get here: the access
/// guard redirects them to `/auth/login?next=<path>`, and every handler also takes a
/// `SessionUser`, which rejects requests without a session token.
///
/// Role-restricted dashboards (`/dashboard/admin`, `/dashboard/student`) are filtered by
/// the guard's route rules; `/dashboard/professor` is open to every role.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // --- Dashboards ---
        .route("/dashboard", get(handlers::dashboard))
        .route("/dashboard/admin", get(handlers::admin_dashboard))
        .route("/dashboard/student", get(handlers::student_dashboard))
        .route("/dashboard/professor", get(handlers::professor_dashboard))
        // --- Courses & Teams ---
        // GET /cursos
        .route("/cursos", get(handlers::list_courses))
        // GET/POST /cursos/{id}/equipos
        // Team list with counters; POST creates an empty team.
        .route(
            "/cursos/{id}/equipos",
            get(handlers::list_teams).post(handlers::create_team),
        )
        // GET/PUT /cursos/{id}/equipos/{team_id}
        .route(
            "/cursos/{id}/equipos/{team_id}",
            get(handlers::get_team).put(handlers::update_team),
        )
}
