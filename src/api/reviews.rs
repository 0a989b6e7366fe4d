//! Review API endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::auth::{authorize, Action, MaybeUser, Resource};
use crate::errors::AppError;
use crate::models::{CreateReviewRequest, Review};
use crate::AppState;

/// Response body for POST /api/projects/:id/reviews, carrying the fresh aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreatedResponse {
    pub success: bool,
    pub data: Review,
    pub avg_rating: f64,
    pub ratings_count: i64,
}

/// GET /api/projects/:id/reviews - List a project's reviews.
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Review>> {
    if !state.projects.exists(&id).await? {
        return Err(AppError::NotFound(format!("Project {} not found", id)));
    }

    let reviews = state.reviews.list_for_project(&id).await?;
    success(reviews)
}

/// POST /api/projects/:id/reviews - Submit a review and update the aggregate.
pub async fn create_review(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    Path(id): Path<String>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewCreatedResponse>), AppError> {
    authorize(user.as_ref(), Resource::Review, Action::Create)?;

    if !(1..=5).contains(&request.rating) {
        return Err(AppError::Validation(
            "Rating must be an integer between 1 and 5".to_string(),
        ));
    }

    // Reviewer identity comes from the verified session only
    let reviewer_id = user.as_ref().map(|u| u.id.as_str());

    let (review, aggregate) = state
        .reviews
        .create(&id, reviewer_id, request.rating, request.comment.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            success: true,
            data: review,
            avg_rating: aggregate.avg_rating,
            ratings_count: aggregate.ratings_count,
        }),
    ))
}
