//! Contact form persistence.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{ContactMessage, CreateContactRequest};

/// Repository for contact form submissions.
#[derive(Clone)]
pub struct ContactRepository {
    pool: SqlitePool,
}

impl ContactRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a contact form submission.
    pub async fn create(&self, request: &CreateContactRequest) -> Result<ContactMessage, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO contacts (id, name, email, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.message)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(ContactMessage {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            message: request.message.clone(),
            created_at: now,
        })
    }

    /// List all submissions, newest first.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, email, message, created_at FROM contacts ORDER BY created_at DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ContactMessage {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                message: row.get("message"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
