use crate::{
    catalog,
    error::{AppError, AppResult},
    models::{Course, Team, TeamStatus, UpdateTeamForm},
};
use async_trait::async_trait;
use chrono::Utc;
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// TeamRepository
///
/// Contract for the course catalog and the teams inside each course. Handlers only
/// see this trait, so tests can substitute their own implementation.
///
/// **Send + Sync + async_trait** make `Arc<dyn TeamRepository>` shareable across
/// Axum's request tasks.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    // --- Catalog ---
    async fn list_courses(&self) -> Vec<Course>;
    async fn get_course(&self, course_id: u32) -> Option<Course>;

    // --- Teams ---
    // Teams of a course in creation order. Empty for unknown courses.
    async fn list_teams(&self, course_id: u32) -> Vec<Team>;
    async fn get_team(&self, course_id: u32, team_id: &str) -> Option<Team>;
    // Name is trimmed and must not be blank. The team starts empty and forming.
    async fn create_team(&self, course_id: u32, name: &str, creator_id: &str) -> AppResult<Team>;
    // Partial update. Member count is bounded by the course's max team size.
    async fn update_team(
        &self,
        course_id: u32,
        team_id: &str,
        form: UpdateTeamForm,
    ) -> AppResult<Team>;
}

/// RepositoryState
///
/// The shared handle stored in `AppState`.
pub type RepositoryState = Arc<dyn TeamRepository>;

/// InMemoryTeamRepository
///
/// Process-local team store. Every catalog course starts with the sample teams;
/// nothing survives a restart.
pub struct InMemoryTeamRepository {
    courses: Vec<Course>,
    teams: RwLock<BTreeMap<u32, Vec<Team>>>,
}

impl InMemoryTeamRepository {
    /// Creates a repository over the catalog, seeded with the sample teams.
    pub fn seeded() -> Self {
        let courses = catalog::courses();
        let teams = courses
            .iter()
            .map(|c| (c.id_course, catalog::sample_teams(c.id_course)))
            .collect();
        Self {
            courses,
            teams: RwLock::new(teams),
        }
    }

    /// Creates a repository over the given courses with no teams at all.
    pub fn empty(courses: Vec<Course>) -> Self {
        let teams = courses.iter().map(|c| (c.id_course, Vec::new())).collect();
        Self {
            courses,
            teams: RwLock::new(teams),
        }
    }

    fn course(&self, course_id: u32) -> AppResult<&Course> {
        self.courses
            .iter()
            .find(|c| c.id_course == course_id)
            .ok_or(AppError::CourseNotFound(course_id))
    }
}

fn normalized_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation("team name must not be blank"));
    }
    Ok(name.to_string())
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn list_courses(&self) -> Vec<Course> {
        self.courses.clone()
    }

    async fn get_course(&self, course_id: u32) -> Option<Course> {
        self.course(course_id).ok().cloned()
    }

    async fn list_teams(&self, course_id: u32) -> Vec<Team> {
        self.teams
            .read()
            .await
            .get(&course_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn get_team(&self, course_id: u32, team_id: &str) -> Option<Team> {
        self.teams
            .read()
            .await
            .get(&course_id)
            .and_then(|teams| teams.iter().find(|t| t.id == team_id).cloned())
    }

    async fn create_team(&self, course_id: u32, name: &str, creator_id: &str) -> AppResult<Team> {
        self.course(course_id)?;
        let name = normalized_name(name)?;

        let team = Team {
            id: Uuid::new_v4().to_string(),
            name,
            course_id,
            creator_id: creator_id.to_string(),
            project_id: "new-project-id".to_string(),
            members: Vec::new(),
            status: Some(TeamStatus::Forming),
            created_at: Utc::now(),
            updated_at: None,
        };

        self.teams
            .write()
            .await
            .entry(course_id)
            .or_default()
            .push(team.clone());

        tracing::info!(course_id, team_id = %team.id, "team created");
        Ok(team)
    }

    async fn update_team(
        &self,
        course_id: u32,
        team_id: &str,
        form: UpdateTeamForm,
    ) -> AppResult<Team> {
        let max_team_size = self.course(course_id)?.max_team_size;
        let name = form.name.as_deref().map(normalized_name).transpose()?;
        if let Some(members) = &form.members {
            if members.len() > max_team_size {
                return Err(AppError::validation(format!(
                    "a team in this course holds at most {} members",
                    max_team_size
                )));
            }
        }

        let mut teams = self.teams.write().await;
        let team = teams
            .get_mut(&course_id)
            .and_then(|teams| teams.iter_mut().find(|t| t.id == team_id))
            .ok_or_else(|| AppError::TeamNotFound {
                course_id,
                team_id: team_id.to_string(),
            })?;

        if let Some(name) = name {
            team.name = name;
        }
        if let Some(members) = form.members {
            team.members = members;
        }
        if let Some(status) = form.status {
            team.status = Some(status);
        }
        team.updated_at = Some(Utc::now());

        tracing::info!(course_id, team_id, "team updated");
        Ok(team.clone())
    }
}
