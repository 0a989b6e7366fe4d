//! Project model matching the frontend Project interface.

use serde::{Deserialize, Serialize};

use super::UserProfile;

/// A member of a project team, in submission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A student project with its rating aggregate.
///
/// `avg_rating` is derived from the stored raw sum/count at read time and is
/// never persisted, so it cannot drift from the underlying reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<String>,
    pub avg_rating: f64,
    pub ratings_count: i64,
    pub created_at: String,
}

/// Request body for creating a new project.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub team_members: Option<Vec<TeamMember>>,
    #[serde(default)]
    pub mentor_name: Option<String>,
    #[serde(default)]
    pub mentor_email: Option<String>,
}

/// Query parameters for listing projects.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// A project joined with its resolved mentor directory entry, for the HOD view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor: Option<UserProfile>,
}
