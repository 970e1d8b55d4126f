use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::handlers as admin_handlers;
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, models as auth_models};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::feedback::{
    dtos as feedback_dtos, handlers as feedback_handlers, models as feedback_models,
};
use crate::shared::types::Meta;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::get_me,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        // Feedback
        feedback_handlers::create_feedback,
        feedback_handlers::list_feedback,
        feedback_handlers::get_feedback,
        feedback_handlers::update_feedback,
        feedback_handlers::rate_feedback,
        // Dashboard
        dashboard_handlers::get_dashboard_stats,
        dashboard_handlers::get_public_stats,
        // Admin
        admin_handlers::init_default_data,
    ),
    components(schemas(
        Meta,
        auth_models::UserRole,
        auth_dtos::RegisterRequestDto,
        auth_dtos::LoginRequestDto,
        auth_dtos::UserResponseDto,
        auth_dtos::AuthResponseDto,
        categories_dtos::CreateCategoryDto,
        categories_dtos::CategoryResponseDto,
        feedback_models::FeedbackStatus,
        feedback_models::FeedbackPriority,
        feedback_models::Location,
        feedback_models::MediaFile,
        feedback_dtos::CreateFeedbackDto,
        feedback_dtos::UpdateFeedbackDto,
        feedback_dtos::RateFeedbackDto,
        feedback_dtos::FeedbackResponseDto,
        dashboard_dtos::DashboardStatsDto,
        dashboard_dtos::CategoryVolumeDto,
        dashboard_dtos::DepartmentVolumeDto,
        dashboard_dtos::PublicStatsDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login, and current-user endpoints"),
        (name = "categories", description = "Category registry"),
        (name = "feedback", description = "Feedback intake and triage"),
        (name = "dashboard", description = "Staff and public statistics"),
        (name = "admin", description = "Administrative initialization"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer token security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the generated info block with configured values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
