//! Session-based authentication.
//!
//! Identity is re-derived on every request from a server-issued bearer token;
//! client-supplied role or user-id fields are never trusted.

mod policy;

pub use policy::*;

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::models::{Role, User};
use crate::AppState;

/// Alternative header for the session token, for clients that cannot set
/// an Authorization header.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// The verified identity behind a request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        AuthUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Extractor requiring a valid session. Rejects with 401 otherwise.
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Missing session token".to_string()))?;

        lookup_session(state, &token).await
    }
}

/// Extractor for routes where identity is optional. A missing token yields
/// `None`; a token that is present but invalid is still rejected with 401.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts) {
            Some(token) => Ok(MaybeUser(Some(lookup_session(state, &token).await?))),
            None => Ok(MaybeUser(None)),
        }
    }
}

/// Pull the session token from the Authorization header or the fallback header.
fn bearer_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string());

    bearer.or_else(|| {
        parts
            .headers
            .get(SESSION_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    })
}

async fn lookup_session(state: &AppState, token: &str) -> Result<AuthUser, AppError> {
    let user = state
        .users
        .find_user_by_session(token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))?;

    Ok(user.into())
}

/// Perform constant-time string comparison.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    a_bytes.ct_eq(b_bytes).into()
}
