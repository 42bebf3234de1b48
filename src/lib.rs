use axum::{
    Router,
    extract::FromRef,
    http::HeaderName,
    middleware,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod models;
pub mod repository;

// Page routers (Public, Authenticated, Admin).
pub mod routes;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use guard::{GuardDecision, GuardPolicy};
pub use repository::{InMemoryTeamRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for every page handler and view model, served at
/// `/api/openapi.json` with Swagger UI at `/api/swagger-ui`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health, handlers::landing, handlers::login_page, handlers::register_page,
        handlers::dashboard, handlers::admin_dashboard, handlers::student_dashboard,
        handlers::professor_dashboard, handlers::list_courses, handlers::list_teams,
        handlers::create_team, handlers::get_team, handlers::update_team,
        handlers::admin_overview
    ),
    components(
        schemas(
            models::UserInfo, models::Permission, models::Course, models::Student,
            models::TeamStatus, models::Team, models::CreateTeamForm, models::UpdateTeamForm,
            models::TeamView, models::TeamStats, models::TeamListView, models::DashboardView,
            models::CourseSummary, models::AdminOverview, models::AuthPageView,
            models::LandingView, models::HealthStatus, auth::RoleClass,
        )
    ),
    tags(
        (name = "innosistemas", description = "Innosistemas course and team management pages")
    )
)]
struct ApiDoc;

/// AppState
///
/// Shared, immutable container for everything a request may need.
#[derive(Clone)]
pub struct AppState {
    /// Course catalog and team store.
    pub repo: RepositoryState,
    /// Configuration loaded at startup.
    pub config: AppConfig,
    /// Tables consulted by the access guard.
    pub policy: GuardPolicy,
}

impl AppState {
    /// State with the given repository, default configuration and the production guard tables.
    pub fn new(repo: RepositoryState, config: AppConfig) -> Self {
        Self {
            repo,
            config,
            policy: GuardPolicy::default(),
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for GuardPolicy {
    fn from_ref(app_state: &AppState) -> GuardPolicy {
        app_state.policy
    }
}

/// create_router
///
/// Assembles the page routers and asset services, mounts the access guard over all
/// of them, and wraps the result in the observability layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");
    let assets = state.config.assets_dir.clone();

    let base_router = Router::new()
        // Documentation lives under /api so the guard never redirects it.
        .merge(SwaggerUi::new("/api/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(authenticated::authenticated_routes())
        .nest("/admin", admin::admin_routes())
        // Front-end build output and static media.
        .nest_service("/_next/static", ServeDir::new(assets.join("_next").join("static")))
        .nest_service("/icons", ServeDir::new(assets.join("icons")))
        .nest_service("/images", ServeDir::new(assets.join("images")))
        .route_service("/favicon.ico", ServeFile::new(assets.join("favicon.ico")))
        .with_state(state.clone())
        // Runs for every route and the fallback; excluded paths pass straight through.
        .layer(middleware::from_fn_with_state(state, guard::access_guard));

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for `TraceLayer`: method, URI and the `x-request-id` set by the layer above it.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
