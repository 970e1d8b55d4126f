use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// Initialize default categories (admin only)
#[utoipa::path(
    post,
    path = "/api/init/default-data",
    responses(
        (status = 200, description = "Default data initialized", body = ApiResponse<String>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient permissions")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn init_default_data(
    State(service): State<Arc<AdminService>>,
    RequireAdmin(user): RequireAdmin,
) -> Result<Json<ApiResponse<String>>> {
    service.init_default_data(&user).await?;
    Ok(Json(ApiResponse::success(
        Some("Default data initialized successfully".to_string()),
        None,
        None,
    )))
}
