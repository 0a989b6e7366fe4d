//! Mentor and mentee directory endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::auth::{authorize, Action, MaybeUser, Resource};
use crate::models::{Role, UserProfile};
use crate::AppState;

/// GET /api/mentors - All mentors, without credentials.
pub async fn list_mentors(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Vec<UserProfile>> {
    authorize(user.as_ref(), Resource::Directory, Action::Read)?;

    let mentors = state.users.list_by_role(Role::Mentor).await?;
    success(mentors)
}

/// GET /api/mentees - All mentees, without credentials.
pub async fn list_mentees(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> ApiResult<Vec<UserProfile>> {
    authorize(user.as_ref(), Resource::Directory, Action::Read)?;

    let mentees = state.users.list_by_role(Role::Mentee).await?;
    success(mentees)
}
