use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::auth::RoleClass;

// --- Identity (decoded from the `user_info` cookie) ---

/// Permission
///
/// A single named permission granted to the signed-in user by the identity backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Permission {
    pub name_permission: String,
}

/// UserInfo
///
/// The user profile the identity backend stores in the `user_info` cookie.
/// Every field defaults so that a partial object still decodes; only `role`
/// matters to the access guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    // Free-form role string, e.g. "admin", "Estudiante", "Profesor".
    pub role: Option<String>,
    pub permissions: Vec<Permission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_ids: Option<Vec<String>>,
}

// --- Catalog ---

/// Course
///
/// A course from the software-engineering catalog, with the team size bounds
/// enforced when teams are edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Course {
    pub id_course: u32,
    pub name_course: String,
    pub description: String,
    pub semester: u8,
    pub status: bool,
    pub professor: String,
    pub min_team_size: usize,
    pub max_team_size: usize,
    pub is_active: bool,
}

// --- Teams ---

/// Student
///
/// A team member as shown on the team pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_ids: Option<Vec<String>>,
    // Course id -> team id the student currently belongs to in that course.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_teams: Option<BTreeMap<String, String>>,
}

/// TeamStatus
///
/// Lifecycle of a team inside a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TeamStatus {
    Forming,
    Active,
    Completed,
    Incomplete,
}

impl TeamStatus {
    /// Display label used on the team cards.
    pub fn label(status: Option<TeamStatus>) -> &'static str {
        match status {
            Some(TeamStatus::Forming) => "En Formación",
            Some(TeamStatus::Active) => "Activo",
            Some(TeamStatus::Completed) => "Completado",
            _ => "Desconocido",
        }
    }
}

/// Team
///
/// A student team within a course. `id` is unique within its course only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub course_id: u32,
    pub creator_id: String,
    pub project_id: String,
    pub members: Vec<Student>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TeamStatus>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "string | null")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// --- Request Payloads (Input Schemas) ---

/// CreateTeamForm
///
/// Payload of the "Crear Equipo" form (POST /cursos/{id}/equipos).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateTeamForm {
    pub name_team: String,
}

/// UpdateTeamForm
///
/// Partial update payload of the edit-team dialog (PUT /cursos/{id}/equipos/{team_id}).
/// Absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UpdateTeamForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Student>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TeamStatus>,
}

/// --- Page View Models (Output) ---

/// TeamView
///
/// A team card: the team itself plus the values the page derives from it.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TeamView {
    #[serde(flatten)]
    pub team: Team,
    pub status_label: String,
    // "Miembros del Equipo (n/max)" and whether the "+ Agregar Miembro" button shows.
    pub max_team_size: usize,
    pub can_add_member: bool,
}

impl TeamView {
    pub fn new(team: Team, course: &Course) -> Self {
        Self {
            status_label: TeamStatus::label(team.status).to_string(),
            max_team_size: course.max_team_size,
            can_add_member: team.members.len() < course.max_team_size,
            team,
        }
    }
}

/// TeamStats
///
/// The four counters at the top of the team list page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TeamStats {
    pub total_teams: usize,
    pub active_teams: usize,
    pub forming_teams: usize,
    pub total_students: usize,
}

impl TeamStats {
    pub fn from_teams(teams: &[Team]) -> Self {
        let count = |status| teams.iter().filter(|t| t.status == Some(status)).count();
        Self {
            total_teams: teams.len(),
            active_teams: count(TeamStatus::Active),
            forming_teams: count(TeamStatus::Forming),
            total_students: teams.iter().map(|t| t.members.len()).sum(),
        }
    }
}

/// TeamListView
///
/// Everything the "Gestión de Equipos" page for one course renders.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TeamListView {
    pub course: Course,
    pub stats: TeamStats,
    pub teams: Vec<TeamView>,
}

/// DashboardView
///
/// Dashboard landing content for a signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardView {
    pub title: String,
    pub subtitle: String,
    pub welcome_name: Option<String>,
    pub role: RoleClass,
    pub role_label: String,
}

/// CourseSummary
///
/// One row of the admin overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CourseSummary {
    pub id_course: u32,
    pub name_course: String,
    pub total_teams: usize,
    pub total_students: usize,
}

/// AdminOverview
///
/// Output of GET /admin: team and student counts per course.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AdminOverview {
    pub courses: Vec<CourseSummary>,
    pub total_teams: usize,
    pub total_students: usize,
}

/// AuthPageView
///
/// Login/register page descriptor. `next` carries the post-login return path.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AuthPageView {
    pub page: String,
    pub next: Option<String>,
}

/// LandingView
///
/// Public landing page (`/`) for anonymous visitors.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LandingView {
    pub title: String,
    pub courses: Vec<Course>,
}

/// HealthStatus
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
}
