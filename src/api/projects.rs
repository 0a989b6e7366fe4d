//! Project API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::auth::{authorize, Action, MaybeUser, Resource};
use crate::errors::AppError;
use crate::models::{
    CreateProjectRequest, Project, ProjectDetail, ProjectListQuery, Role,
};
use crate::AppState;

/// Response body for POST /api/projects.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreatedResponse {
    pub success: bool,
    pub message: String,
    pub project_id: String,
}

/// Query parameters for GET /api/mentor-projects.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProjectsQuery {
    #[serde(default)]
    pub mentor_email: Option<String>,
}

/// GET /api/projects - List projects, optionally filtered by a search term.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> ApiResult<Vec<Project>> {
    let projects = state.projects.list(params.search.as_deref()).await?;
    success(projects)
}

/// POST /api/projects - Create a new project.
pub async fn create_project(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectCreatedResponse>), AppError> {
    authorize(user.as_ref(), Resource::Project, Action::Create)?;

    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    // Resolve the mentor foreign key when the email belongs to a registered mentor
    let mentor_id = match request.mentor_email.as_deref() {
        Some(email) => state
            .users
            .find_profile_by_email(email)
            .await?
            .filter(|profile| profile.role == Role::Mentor)
            .map(|profile| profile.id),
        None => None,
    };

    let project = state.projects.create(&request, mentor_id.as_deref()).await?;
    tracing::info!("Created project {} ({})", project.title, project.id);

    Ok((
        StatusCode::CREATED,
        Json(ProjectCreatedResponse {
            success: true,
            message: "Project added successfully".to_string(),
            project_id: project.id,
        }),
    ))
}

/// GET /api/projects/:id (and /:id/detail) - Get a single project.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Project> {
    let project = state
        .projects
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;

    success(project)
}

/// GET /api/mentor-projects?mentorEmail= - A mentor's projects.
pub async fn mentor_projects(
    State(state): State<AppState>,
    Query(params): Query<MentorProjectsQuery>,
) -> ApiResult<Vec<Project>> {
    let mentor_email = params
        .mentor_email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("Mentor email is required".to_string()))?;

    let projects = state.projects.list_by_mentor_email(mentor_email).await?;
    success(projects)
}

/// GET /api/hod/project-details - Every project with its resolved mentor.
pub async fn hod_project_details(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Vec<ProjectDetail>> {
    authorize(user.as_ref(), Resource::Dashboard, Action::Read)?;

    let projects = state.projects.list(None).await?;

    let mut details = Vec::with_capacity(projects.len());
    for project in projects {
        let mentor = match project.mentor_email.as_deref() {
            Some(email) => state.users.find_profile_by_email(email).await?,
            None => None,
        };
        details.push(ProjectDetail { project, mentor });
    }

    success(details)
}
