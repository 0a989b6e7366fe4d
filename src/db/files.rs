//! Uploaded artifact persistence. Blobs live in SQLite next to their metadata.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{FileInfo, StoredFile};

/// Repository for uploaded milestone artifacts.
#[derive(Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store an uploaded blob keyed by its project.
    pub async fn store(
        &self,
        project_id: &str,
        filename: &str,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<FileInfo, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO files (id, project_id, filename, content_type, data, uploaded_at) VALUES (?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(project_id)
        .bind(filename)
        .bind(content_type)
        .bind(data)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(FileInfo {
            file_id: id,
            project_id: project_id.to_string(),
            filename: filename.to_string(),
            content_type: content_type.map(|s| s.to_string()),
            uploaded_at: now,
        })
    }

    /// Fetch a file with its payload for download.
    pub async fn get(&self, id: &str) -> Result<Option<StoredFile>, AppError> {
        let row = sqlx::query(
            "SELECT id, project_id, filename, content_type, data, uploaded_at FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| StoredFile {
            info: info_from_row(&row),
            data: row.get("data"),
        }))
    }

    /// Metadata for a project's files, newest first. Payloads are not loaded.
    pub async fn list_for_project(&self, project_id: &str) -> Result<Vec<FileInfo>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, project_id, filename, content_type, uploaded_at
               FROM files WHERE project_id = ? ORDER BY uploaded_at DESC, id"#,
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(info_from_row).collect())
    }

    /// Metadata for every stored file, newest first.
    pub async fn list_all(&self) -> Result<Vec<FileInfo>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, project_id, filename, content_type, uploaded_at
               FROM files ORDER BY uploaded_at DESC, id"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(info_from_row).collect())
    }
}

fn info_from_row(row: &sqlx::sqlite::SqliteRow) -> FileInfo {
    FileInfo {
        file_id: row.get("id"),
        project_id: row.get("project_id"),
        filename: row.get("filename"),
        content_type: row.get("content_type"),
        uploaded_at: row.get("uploaded_at"),
    }
}
