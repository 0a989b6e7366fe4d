//! Account endpoints: signup and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::auth::constant_time_compare;
use crate::errors::AppError;
use crate::models::{LoginRequest, Role, SignupRequest};
use crate::AppState;

/// Response body for POST /api/signup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
}

/// Response body for POST /api/login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub role: Role,
    pub user_id: String,
    pub token: String,
}

/// POST /api/signup - Register a new user.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), AppError> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "A valid email is required".to_string(),
        ));
    }
    if request.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let user = state.users.create_user(&request).await?;
    tracing::info!("Registered user {} as {}", user.email, user.role.as_str());

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            success: true,
            message: "User registered successfully".to_string(),
            user_id: user.id,
        }),
    ))
}

/// POST /api/login - Verify credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    // Same message for unknown email and wrong password
    let invalid = || AppError::Validation("Invalid credentials".to_string());

    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;

    let matches = user
        .password
        .as_deref()
        .is_some_and(|stored| constant_time_compare(stored, &request.password));
    if !matches {
        return Err(invalid());
    }

    let session = state
        .users
        .create_session(&user.id, state.config.session_ttl_hours)
        .await?;
    tracing::info!("Issued session for {} (expires {})", user.email, session.expires_at);

    Ok(Json(LoginResponse {
        success: true,
        role: user.role,
        user_id: session.user_id,
        token: session.token,
    }))
}
