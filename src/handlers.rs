use crate::{
    AppState,
    auth::{RoleClass, SessionUser},
    error::{AppError, AppResult},
    models::{
        AdminOverview, AuthPageView, Course, CourseSummary, CreateTeamForm, DashboardView,
        HealthStatus, LandingView, TeamListView, TeamStats, TeamView, UpdateTeamForm,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

const PORTAL_TITLE: &str = "Dashboard - Gestión de Equipos";
const PORTAL_SUBTITLE: &str = "Universidad de Antioquia - Ingeniería de Software";

/// AuthQuery
///
/// Query parameters accepted by the login and register pages.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct AuthQuery {
    /// Path to return to after signing in, set by the access guard.
    pub next: Option<String>,
}

// --- Public Handlers ---

/// health
///
/// [Public Route] Liveness probe. Lives under `/api`, which the access guard never sees.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}

/// landing
///
/// [Public Route] Landing page for anonymous visitors. Signed-in visitors are sent to
/// their dashboard by the guard before reaching this handler.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page", body = LandingView))
)]
pub async fn landing(State(state): State<AppState>) -> Json<LandingView> {
    Json(LandingView {
        title: "Innosistemas".to_string(),
        courses: state.repo.list_courses().await,
    })
}

/// login_page
///
/// [Public Route] Login form descriptor, echoing the `next` return path.
#[utoipa::path(
    get,
    path = "/auth/login",
    params(AuthQuery),
    responses((status = 200, description = "Login page", body = AuthPageView))
)]
pub async fn login_page(Query(query): Query<AuthQuery>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "login".to_string(),
        next: query.next,
    })
}

/// register_page
#[utoipa::path(
    get,
    path = "/auth/register",
    params(AuthQuery),
    responses((status = 200, description = "Register page", body = AuthPageView))
)]
pub async fn register_page(Query(query): Query<AuthQuery>) -> Json<AuthPageView> {
    Json(AuthPageView {
        page: "register".to_string(),
        next: query.next,
    })
}

// --- Dashboards ---

fn dashboard_view(user: &SessionUser, title: &str) -> DashboardView {
    DashboardView {
        title: title.to_string(),
        subtitle: PORTAL_SUBTITLE.to_string(),
        welcome_name: user
            .info
            .as_ref()
            .map(|info| info.name.clone())
            .filter(|name| !name.is_empty()),
        role: user.role,
        role_label: user.role.label().to_string(),
    }
}

/// dashboard
///
/// [Authenticated Route] Generic dashboard. This is where visitors with an
/// unrecognized role land, and where role mismatches are redirected.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses((status = 200, description = "Dashboard", body = DashboardView))
)]
pub async fn dashboard(user: SessionUser) -> Json<DashboardView> {
    Json(dashboard_view(&user, PORTAL_TITLE))
}

/// admin_dashboard
///
/// [Authenticated Route] Administrator home. Access is enforced by the guard's
/// `/dashboard/admin` rule.
#[utoipa::path(
    get,
    path = "/dashboard/admin",
    responses((status = 200, description = "Admin dashboard", body = DashboardView))
)]
pub async fn admin_dashboard(user: SessionUser) -> Json<DashboardView> {
    Json(dashboard_view(&user, "Panel de Administración"))
}

/// student_dashboard
#[utoipa::path(
    get,
    path = "/dashboard/student",
    responses((status = 200, description = "Student dashboard", body = DashboardView))
)]
pub async fn student_dashboard(user: SessionUser) -> Json<DashboardView> {
    Json(dashboard_view(&user, "Panel del Estudiante"))
}

/// professor_dashboard
///
/// [Authenticated Route] Professor home. No guard rule covers this path, so any
/// signed-in visitor can open it.
#[utoipa::path(
    get,
    path = "/dashboard/professor",
    responses((status = 200, description = "Professor dashboard", body = DashboardView))
)]
pub async fn professor_dashboard(user: SessionUser) -> Json<DashboardView> {
    Json(dashboard_view(&user, "Panel del Profesor"))
}

// --- Courses & Teams ---

/// list_courses
#[utoipa::path(
    get,
    path = "/cursos",
    responses((status = 200, description = "Course catalog", body = [Course]))
)]
pub async fn list_courses(_user: SessionUser, State(state): State<AppState>) -> Json<Vec<Course>> {
    Json(state.repo.list_courses().await)
}

/// list_teams
///
/// [Authenticated Route] The "Gestión de Equipos" page of a course: every team with
/// its derived card values, plus the page counters.
#[utoipa::path(
    get,
    path = "/cursos/{id}/equipos",
    params(("id" = u32, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Teams of the course", body = TeamListView),
        (status = 404, description = "Unknown course")
    )
)]
pub async fn list_teams(
    _user: SessionUser,
    State(state): State<AppState>,
    Path(course_id): Path<u32>,
) -> AppResult<Json<TeamListView>> {
    let course = state
        .repo
        .get_course(course_id)
        .await
        .ok_or(AppError::CourseNotFound(course_id))?;
    let teams = state.repo.list_teams(course_id).await;

    Ok(Json(TeamListView {
        stats: TeamStats::from_teams(&teams),
        teams: teams
            .into_iter()
            .map(|team| TeamView::new(team, &course))
            .collect(),
        course,
    }))
}

/// create_team
///
/// [Authenticated Route] Creates an empty team in a course. The creator is the
/// signed-in user.
#[utoipa::path(
    post,
    path = "/cursos/{id}/equipos",
    params(("id" = u32, Path, description = "Course ID")),
    request_body = CreateTeamForm,
    responses(
        (status = 201, description = "Team created", body = TeamView),
        (status = 404, description = "Unknown course"),
        (status = 422, description = "Blank team name")
    )
)]
pub async fn create_team(
    user: SessionUser,
    State(state): State<AppState>,
    Path(course_id): Path<u32>,
    Json(form): Json<CreateTeamForm>,
) -> AppResult<(StatusCode, Json<TeamView>)> {
    let course = state
        .repo
        .get_course(course_id)
        .await
        .ok_or(AppError::CourseNotFound(course_id))?;
    let team = state
        .repo
        .create_team(course_id, &form.name_team, &user.user_id())
        .await?;
    Ok((StatusCode::CREATED, Json(TeamView::new(team, &course))))
}

/// get_team
#[utoipa::path(
    get,
    path = "/cursos/{id}/equipos/{team_id}",
    params(
        ("id" = u32, Path, description = "Course ID"),
        ("team_id" = String, Path, description = "Team ID")
    ),
    responses(
        (status = 200, description = "Team details", body = TeamView),
        (status = 404, description = "Unknown course or team")
    )
)]
pub async fn get_team(
    _user: SessionUser,
    State(state): State<AppState>,
    Path((course_id, team_id)): Path<(u32, String)>,
) -> AppResult<Json<TeamView>> {
    let course = state
        .repo
        .get_course(course_id)
        .await
        .ok_or(AppError::CourseNotFound(course_id))?;
    let team = state
        .repo
        .get_team(course_id, &team_id)
        .await
        .ok_or(AppError::TeamNotFound { course_id, team_id })?;
    Ok(Json(TeamView::new(team, &course)))
}

/// update_team
///
/// [Authenticated Route] Saves the edit-team dialog. Only provided fields change.
#[utoipa::path(
    put,
    path = "/cursos/{id}/equipos/{team_id}",
    params(
        ("id" = u32, Path, description = "Course ID"),
        ("team_id" = String, Path, description = "Team ID")
    ),
    request_body = UpdateTeamForm,
    responses(
        (status = 200, description = "Team updated", body = TeamView),
        (status = 404, description = "Unknown course or team"),
        (status = 422, description = "Blank name or too many members")
    )
)]
pub async fn update_team(
    _user: SessionUser,
    State(state): State<AppState>,
    Path((course_id, team_id)): Path<(u32, String)>,
    Json(form): Json<UpdateTeamForm>,
) -> AppResult<Json<TeamView>> {
    let course = state
        .repo
        .get_course(course_id)
        .await
        .ok_or(AppError::CourseNotFound(course_id))?;
    let team = state.repo.update_team(course_id, &team_id, form).await?;
    Ok(Json(TeamView::new(team, &course)))
}

// --- Admin ---

/// admin_overview
///
/// [Admin Route] Team and student counts per course.
///
/// *Authorization*: the guard's `/admin` rule already filters non-admins; the
/// handler checks the role again and answers 403 otherwise.
#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Per-course overview", body = AdminOverview),
        (status = 403, description = "Not an administrator")
    )
)]
pub async fn admin_overview(
    user: SessionUser,
    State(state): State<AppState>,
) -> AppResult<Json<AdminOverview>> {
    if user.role != RoleClass::Admin {
        return Err(AppError::Forbidden("administrator role required".to_string()));
    }

    let mut overview = AdminOverview::default();
    for course in state.repo.list_courses().await {
        let stats = TeamStats::from_teams(&state.repo.list_teams(course.id_course).await);
        overview.total_teams += stats.total_teams;
        overview.total_students += stats.total_students;
        overview.courses.push(CourseSummary {
            id_course: course.id_course,
            name_course: course.name_course,
            total_teams: stats.total_teams,
            total_students: stats.total_students,
        });
    }
    Ok(Json(overview))
}
