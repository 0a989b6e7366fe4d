//! User and session persistence.

use chrono::{Duration, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Role, SignupRequest, User, UserProfile};

/// An issued login session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub expires_at: String,
}

/// Repository for user accounts and their login sessions.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user. Emails are stored lowercased; a duplicate email is a conflict.
    pub async fn create_user(&self, request: &SignupRequest) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let email = request.email.trim().to_lowercase();

        let result = sqlx::query(
            "INSERT INTO users (id, name, email, password, role, mentor_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&email)
        .bind(&request.password)
        .bind(request.role.as_str())
        .bind(&request.mentor_id)
        .bind(&now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(User {
                id,
                name: request.name.clone(),
                email,
                password: Some(request.password.clone()),
                role: request.role,
                mentor_id: request.mentor_id.clone(),
                created_at: now,
            }),
            Err(e) => {
                // The UNIQUE constraint on email closes the check-then-insert race
                if e.as_database_error()
                    .is_some_and(|db| db.is_unique_violation())
                {
                    Err(AppError::Conflict("User already exists".to_string()))
                } else {
                    Err(e.into())
                }
            }
        }
    }

    /// Look up a user by email (lowercased), including credentials.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, email, password, role, mentor_id, created_at FROM users WHERE email = ?",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    /// Directory listing for one role. The password column is never selected.
    pub async fn list_by_role(&self, role: Role) -> Result<Vec<UserProfile>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, email, role, mentor_id, created_at FROM users WHERE role = ? ORDER BY email",
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(profile_from_row).collect()
    }

    /// Directory entry for a single email, if registered.
    pub async fn find_profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, email, role, mentor_id, created_at FROM users WHERE email = ?",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    /// Issue a session for a user. Expired sessions are swept opportunistically.
    pub async fn create_session(&self, user_id: &str, ttl_hours: i64) -> Result<Session, AppError> {
        let now = Utc::now();
        let token = format!(
            "{}{}",
            uuid::Uuid::new_v4().simple(),
            uuid::Uuid::new_v4().simple()
        );
        let expires_at = (now + Duration::hours(ttl_hours)).to_rfc3339();

        sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now.to_rfc3339())
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&token)
        .bind(user_id)
        .bind(now.to_rfc3339())
        .bind(&expires_at)
        .execute(&self.pool)
        .await?;

        Ok(Session {
            token,
            user_id: user_id.to_string(),
            expires_at,
        })
    }

    /// Resolve a session token to its user, rejecting expired sessions.
    pub async fn find_user_by_session(&self, token: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"SELECT u.id, u.name, u.email, u.password, u.role, u.mentor_id, u.created_at
               FROM sessions s JOIN users u ON u.id = s.user_id
               WHERE s.token = ? AND s.expires_at > ?"#,
        )
        .bind(token)
        .bind(Utc::now().to_rfc3339())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose()
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, AppError> {
    let role_str: String = row.get("role");
    let role = Role::from_str(&role_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", role_str)))?;

    Ok(User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password: row.get("password"),
        role,
        mentor_id: row.get("mentor_id"),
        created_at: row.get("created_at"),
    })
}

fn profile_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserProfile, AppError> {
    let role_str: String = row.get("role");
    let role = Role::from_str(&role_str)
        .ok_or_else(|| AppError::Internal(format!("Unknown role in database: {}", role_str)))?;

    Ok(UserProfile {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role,
        mentor_id: row.get("mentor_id"),
        created_at: row.get("created_at"),
    })
}
