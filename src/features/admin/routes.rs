use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Protected admin routes (admin only, enforced by the handler guard)
pub fn protected_routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/api/init/default-data", post(handlers::init_default_data))
        .with_state(service)
}
