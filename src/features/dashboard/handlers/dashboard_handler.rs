use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireOfficer;
use crate::features::dashboard::dtos::{DashboardStatsDto, PublicStatsDto};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Staff dashboard statistics (officer scoped to own department)
#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Role-scoped statistics", body = ApiResponse<DashboardStatsDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient permissions")
    ),
    tag = "dashboard",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_dashboard_stats(
    State(service): State<Arc<DashboardService>>,
    RequireOfficer(user): RequireOfficer,
) -> Result<Json<ApiResponse<DashboardStatsDto>>> {
    let stats = service.private_stats(&user).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Public statistics for the transparency dashboard
#[utoipa::path(
    get,
    path = "/api/public/stats",
    responses(
        (status = 200, description = "Global aggregate statistics", body = ApiResponse<PublicStatsDto>),
    ),
    tag = "dashboard"
)]
pub async fn get_public_stats(
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<PublicStatsDto>>> {
    let stats = service.public_stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
