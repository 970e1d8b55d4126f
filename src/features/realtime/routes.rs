use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::realtime::handlers;
use crate::features::realtime::manager::ConnectionManager;

/// Create routes for the realtime channels
pub fn routes(manager: Arc<ConnectionManager>) -> Router {
    Router::new()
        .route("/ws/admin", get(handlers::ws_admin))
        .route("/ws/citizen", get(handlers::ws_citizen))
        .with_state(manager)
}
