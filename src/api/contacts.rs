//! Contact form API endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use super::{success, ApiResult};
use crate::auth::{authorize, Action, MaybeUser, Resource};
use crate::errors::AppError;
use crate::models::{ContactMessage, CreateContactRequest};
use crate::AppState;

/// Response body for POST /api/contacts.
#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/contacts - Submit a contact form message.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ContactCreatedResponse>), AppError> {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.message.trim().is_empty()
    {
        return Err(AppError::Validation("All fields are required".to_string()));
    }

    state.contacts.create(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            success: true,
            message: "Message successfully received!".to_string(),
        }),
    ))
}

/// GET /api/contacts - List submitted messages (oversight roles only).
pub async fn list_contacts(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Vec<ContactMessage>> {
    authorize(user.as_ref(), Resource::Contact, Action::Read)?;

    let messages = state.contacts.list().await?;
    success(messages)
}
