use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireOfficer;
use crate::features::auth::models::User;
use crate::features::feedback::dtos::{
    CreateFeedbackDto, FeedbackListQuery, FeedbackResponseDto, RateFeedbackDto, UpdateFeedbackDto,
};
use crate::features::feedback::services::FeedbackService;
use crate::shared::types::ApiResponse;

/// Submit a feedback report (authenticated or anonymous)
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = CreateFeedbackDto,
    responses(
        (status = 201, description = "Feedback created", body = ApiResponse<FeedbackResponseDto>),
        (status = 400, description = "Validation error or invalid category")
    ),
    tag = "feedback"
)]
pub async fn create_feedback(
    State(service): State<Arc<FeedbackService>>,
    user: Option<User>,
    AppJson(dto): AppJson<CreateFeedbackDto>,
) -> Result<(StatusCode, Json<ApiResponse<FeedbackResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let feedback = service.create(dto, user.as_ref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(feedback), None, None)),
    ))
}

/// List feedback visible to the caller, newest first
#[utoipa::path(
    get,
    path = "/api/feedback",
    params(FeedbackListQuery),
    responses(
        (status = 200, description = "Feedback visible to the caller", body = ApiResponse<Vec<FeedbackResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "feedback",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_feedback(
    State(service): State<Arc<FeedbackService>>,
    user: User,
    Query(query): Query<FeedbackListQuery>,
) -> Result<Json<ApiResponse<Vec<FeedbackResponseDto>>>> {
    let feedback = service.list(&query, &user).await?;
    Ok(Json(ApiResponse::success(Some(feedback), None, None)))
}

/// Get a single feedback report
#[utoipa::path(
    get,
    path = "/api/feedback/{id}",
    params(
        ("id" = Uuid, Path, description = "Feedback id")
    ),
    responses(
        (status = 200, description = "Feedback found", body = ApiResponse<FeedbackResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "feedback",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_feedback(
    State(service): State<Arc<FeedbackService>>,
    user: User,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FeedbackResponseDto>>> {
    let feedback = service.get(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(feedback), None, None)))
}

/// Apply a staff triage update (officer, dept_head, or admin)
#[utoipa::path(
    put,
    path = "/api/feedback/{id}",
    params(
        ("id" = Uuid, Path, description = "Feedback id")
    ),
    request_body = UpdateFeedbackDto,
    responses(
        (status = 200, description = "Feedback updated", body = ApiResponse<FeedbackResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "feedback",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_feedback(
    State(service): State<Arc<FeedbackService>>,
    RequireOfficer(user): RequireOfficer,
    Path(id): Path<Uuid>,
    AppJson(patch): AppJson<UpdateFeedbackDto>,
) -> Result<Json<ApiResponse<FeedbackResponseDto>>> {
    let feedback = service.update(id, patch, &user).await?;
    Ok(Json(ApiResponse::success(Some(feedback), None, None)))
}

/// Rate a resolved report (owning citizen only)
#[utoipa::path(
    post,
    path = "/api/feedback/{id}/rating",
    params(
        ("id" = Uuid, Path, description = "Feedback id")
    ),
    request_body = RateFeedbackDto,
    responses(
        (status = 200, description = "Rating recorded", body = ApiResponse<FeedbackResponseDto>),
        (status = 400, description = "Feedback is not resolved"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Access denied"),
        (status = 404, description = "Feedback not found")
    ),
    tag = "feedback",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rate_feedback(
    State(service): State<Arc<FeedbackService>>,
    user: User,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RateFeedbackDto>,
) -> Result<Json<ApiResponse<FeedbackResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let feedback = service.rate(id, dto, &user).await?;
    Ok(Json(ApiResponse::success(Some(feedback), None, None)))
}
