use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::core::middleware;
use crate::features::auth::services::AuthService;
use crate::features::feedback::handlers;
use crate::features::feedback::services::FeedbackService;

/// Create routes for the feedback feature.
///
/// Submission allows anonymous callers, so the whole feature runs behind the
/// optional auth middleware; handlers that do require a user enforce it via
/// extractors.
pub fn routes(service: Arc<FeedbackService>, auth_service: Arc<AuthService>) -> Router {
    Router::new()
        .route(
            "/api/feedback",
            post(handlers::create_feedback).get(handlers::list_feedback),
        )
        .route(
            "/api/feedback/{id}",
            get(handlers::get_feedback).put(handlers::update_feedback),
        )
        .route("/api/feedback/{id}/rating", post(handlers::rate_feedback))
        .route_layer(from_fn_with_state(
            auth_service,
            middleware::optional_auth_middleware,
        ))
        .with_state(service)
}
