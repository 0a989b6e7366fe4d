//! Stored file metadata model.

use serde::{Deserialize, Serialize};

/// Metadata for an uploaded milestone artifact. The blob itself is only
/// materialized on download.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub file_id: String,
    pub project_id: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub uploaded_at: String,
}

/// A stored file with its payload, as fetched for download.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub info: FileInfo,
    pub data: Vec<u8>,
}
