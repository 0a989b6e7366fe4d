//! User model and the directory view exposed to the frontend.

use serde::{Deserialize, Serialize};

/// Role a user holds on the platform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Mentor,
    Mentee,
    ProjectCoordinator,
    Hod,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Mentor => "mentor",
            Role::Mentee => "mentee",
            Role::ProjectCoordinator => "project_coordinator",
            Role::Hod => "hod",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mentor" => Some(Role::Mentor),
            "mentee" => Some(Role::Mentee),
            "project_coordinator" => Some(Role::ProjectCoordinator),
            "hod" => Some(Role::Hod),
            _ => None,
        }
    }
}

/// A registered user, including credentials. Never serialized to clients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
    pub mentor_id: Option<String>,
    pub created_at: String,
}

/// Directory entry for a user. The password column is never selected into this view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentor_id: Option<String>,
    pub created_at: String,
}

/// Request body for POST /api/signup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub mentor_id: Option<String>,
}

/// Request body for POST /api/login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
