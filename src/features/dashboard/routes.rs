use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Protected dashboard routes (staff only, enforced by the handler guard)
pub fn protected_routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/stats", get(handlers::get_dashboard_stats))
        .with_state(service)
}

/// Public dashboard routes (no authentication required)
pub fn public_routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/public/stats", get(handlers::get_public_stats))
        .with_state(service)
}
