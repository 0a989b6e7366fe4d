//! Project persistence and the rating aggregate read path.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{CreateProjectRequest, Project, TeamMember};

/// Repository for projects.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new project with a zeroed rating aggregate.
    pub async fn create(
        &self,
        request: &CreateProjectRequest,
        mentor_id: Option<&str>,
    ) -> Result<Project, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let team_members = request.team_members.clone().unwrap_or_default();
        let members_json = serde_json::to_string(&team_members)?;
        // Normalized so the mentor-projects filter matches regardless of case
        let mentor_email = request
            .mentor_email
            .as_ref()
            .map(|e| e.trim().to_lowercase());

        sqlx::query(
            r#"INSERT INTO projects (
                id, title, domain, description, deadline, team_members,
                mentor_name, mentor_email, mentor_id, rating_sum, ratings_count, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, ?)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.domain)
        .bind(&request.description)
        .bind(&request.deadline)
        .bind(&members_json)
        .bind(&request.mentor_name)
        .bind(&mentor_email)
        .bind(mentor_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Project {
            id,
            title: request.title.clone(),
            domain: request.domain.clone(),
            description: request.description.clone(),
            deadline: request.deadline.clone(),
            team_members,
            mentor_name: request.mentor_name.clone(),
            mentor_email,
            mentor_id: mentor_id.map(|s| s.to_string()),
            avg_rating: 0.0,
            ratings_count: 0,
            created_at: now,
        })
    }

    /// List projects, newest first, optionally filtered by a case-insensitive
    /// substring match against title or domain.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Project>, AppError> {
        let term = search.map(str::trim).filter(|t| !t.is_empty());

        let rows = match term {
            Some(term) => {
                let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
                sqlx::query(
                    r#"SELECT id, title, domain, description, deadline, team_members,
                              mentor_name, mentor_email, mentor_id, rating_sum, ratings_count, created_at
                       FROM projects
                       WHERE lower(title) LIKE ? ESCAPE '\' OR lower(domain) LIKE ? ESCAPE '\'
                       ORDER BY created_at DESC, id"#,
                )
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"SELECT id, title, domain, description, deadline, team_members,
                              mentor_name, mentor_email, mentor_id, rating_sum, ratings_count, created_at
                       FROM projects ORDER BY created_at DESC, id"#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(project_from_row).collect()
    }

    /// Get a project by ID.
    pub async fn get(&self, id: &str) -> Result<Option<Project>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, title, domain, description, deadline, team_members,
                      mentor_name, mentor_email, mentor_id, rating_sum, ratings_count, created_at
               FROM projects WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(project_from_row).transpose()
    }

    /// List a mentor's projects, newest first.
    pub async fn list_by_mentor_email(&self, mentor_email: &str) -> Result<Vec<Project>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, title, domain, description, deadline, team_members,
                      mentor_name, mentor_email, mentor_id, rating_sum, ratings_count, created_at
               FROM projects WHERE mentor_email = ? ORDER BY created_at DESC, id"#,
        )
        .bind(mentor_email.trim().to_lowercase())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(project_from_row).collect()
    }

    /// Check whether a project exists.
    pub async fn exists(&self, id: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT 1 FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }
}

/// Derive the served average from the raw aggregate, rounded to 2 decimals.
/// A project without reviews reports 0.
pub(crate) fn rating_average(rating_sum: i64, ratings_count: i64) -> f64 {
    if ratings_count == 0 {
        return 0.0;
    }
    let avg = rating_sum as f64 / ratings_count as f64;
    (avg * 100.0).round() / 100.0
}

/// Escape LIKE wildcards so a search term stays a plain substring match.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn project_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Project, AppError> {
    let members_json: Option<String> = row.get("team_members");
    let team_members: Vec<TeamMember> = members_json
        .map(|s| serde_json::from_str(&s).unwrap_or_default())
        .unwrap_or_default();
    let rating_sum: i64 = row.get("rating_sum");
    let ratings_count: i64 = row.get("ratings_count");

    Ok(Project {
        id: row.get("id"),
        title: row.get("title"),
        domain: row.get("domain"),
        description: row.get("description"),
        deadline: row.get("deadline"),
        team_members,
        mentor_name: row.get("mentor_name"),
        mentor_email: row.get("mentor_email"),
        mentor_id: row.get("mentor_id"),
        avg_rating: rating_average(rating_sum, ratings_count),
        ratings_count,
        created_at: row.get("created_at"),
    })
}
