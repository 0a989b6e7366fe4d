//! Milestone artifact upload/download endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::{authorize, Action, AuthUser, Resource};
use crate::errors::AppError;
use crate::models::FileInfo;
use crate::AppState;

/// Response body for POST /api/files.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub file_id: String,
}

/// File metadata listing envelope.
#[derive(Debug, Serialize)]
pub struct FilesResponse {
    pub success: bool,
    pub files: Vec<FileInfo>,
}

/// POST /api/files - Upload an artifact for a project (multipart form).
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    authorize(Some(&user), Resource::File, Action::Create)?;

    let mut project_id: Option<String> = None;
    let mut upload: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "projectId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid projectId field: {}", e)))?;
                project_id = Some(value);
            }
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;
                upload = Some((filename, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    let project_id = project_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("projectId is required".to_string()))?;
    let (filename, content_type, data) =
        upload.ok_or_else(|| AppError::Validation("A file part is required".to_string()))?;

    if data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::Validation(format!(
            "File exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    if !state.projects.exists(&project_id).await? {
        return Err(AppError::NotFound(format!(
            "Project {} not found",
            project_id
        )));
    }

    let info = state
        .files
        .store(&project_id, &filename, content_type.as_deref(), &data)
        .await?;
    tracing::info!(
        "Stored artifact {} ({} bytes) for project {}",
        info.filename,
        data.len(),
        project_id
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            success: true,
            message: "File uploaded successfully".to_string(),
            file_id: info.file_id,
        }),
    ))
}

/// GET /api/files/:id/download - Stream an artifact back.
pub async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let stored = state
        .files
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("File {} not found", id)))?;

    let content_type = stored
        .info
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());
    // Strip quotes so the filename cannot break out of the header value
    let disposition = format!(
        "attachment; filename=\"{}\"",
        stored.info.filename.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        stored.data,
    )
        .into_response())
}

/// GET /api/projects/:id/files - Metadata for a project's artifacts.
pub async fn list_project_files(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FilesResponse>, AppError> {
    if !state.projects.exists(&id).await? {
        return Err(AppError::NotFound(format!("Project {} not found", id)));
    }

    let files = state.files.list_for_project(&id).await?;
    Ok(Json(FilesResponse {
        success: true,
        files,
    }))
}

/// GET /api/files - Metadata for every stored artifact.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FilesResponse>, AppError> {
    let files = state.files.list_all().await?;
    Ok(Json(FilesResponse {
        success: true,
        files,
    }))
}
