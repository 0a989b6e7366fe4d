//! Central authorization policy.
//!
//! Every guarded handler funnels through `can_access` so role rules live in
//! exactly one place.

use super::AuthUser;
use crate::errors::AppError;
use crate::models::Role;

/// Resource kinds a request can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Directory,
    Project,
    Review,
    Contact,
    File,
    Dashboard,
}

/// What the request wants to do with the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
}

/// Capability check. `None` is an unauthenticated caller.
pub fn can_access(user: Option<&AuthUser>, resource: Resource, action: Action) -> bool {
    match (resource, action) {
        // Public reads and submissions
        (Resource::Project, Action::Read)
        | (Resource::Review, Action::Read)
        | (Resource::Review, Action::Create)
        | (Resource::Contact, Action::Create)
        | (Resource::File, Action::Read) => true,

        // Any signed-in user
        (Resource::Directory, Action::Read) | (Resource::File, Action::Create) => user.is_some(),

        // Mentees submit their own projects; coordinators register them in bulk
        (Resource::Project, Action::Create) => matches!(
            user.map(|u| u.role),
            Some(Role::Mentee) | Some(Role::ProjectCoordinator)
        ),

        // Oversight views
        (Resource::Contact, Action::Read) | (Resource::Dashboard, Action::Read) => matches!(
            user.map(|u| u.role),
            Some(Role::Hod) | Some(Role::ProjectCoordinator)
        ),

        (Resource::Directory, Action::Create) | (Resource::Dashboard, Action::Create) => false,
    }
}

/// Enforce `can_access`, mapping a denial to 401 or 403.
pub fn authorize(
    user: Option<&AuthUser>,
    resource: Resource,
    action: Action,
) -> Result<(), AppError> {
    if can_access(user, resource, action) {
        return Ok(());
    }
    match user {
        None => Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        )),
        Some(_) => Err(AppError::Forbidden(
            "Not allowed for this role".to_string(),
        )),
    }
}
