use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::feedback::models::{
    Feedback, FeedbackPriority, FeedbackStatus, Location, MediaFile,
};
use crate::shared::constants::DEFAULT_LIST_LIMIT;

/// Request DTO for submitting feedback (authenticated or anonymous)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFeedbackDto {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub category_id: Uuid,

    /// Accepted for API compatibility; replaced by the derived value
    pub priority: Option<FeedbackPriority>,

    #[serde(default)]
    pub is_anonymous: bool,

    /// Opaque contact payload for anonymous submitters
    #[schema(value_type = Option<Object>)]
    pub contact_info: Option<serde_json::Value>,

    pub location: Option<Location>,

    #[serde(default)]
    pub media_files: Vec<MediaFile>,
}

/// Request DTO for staff triage updates. Only non-null fields are applied.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateFeedbackDto {
    pub status: Option<FeedbackStatus>,
    pub priority: Option<FeedbackPriority>,
    pub assigned_to: Option<Uuid>,
    pub resolution_notes: Option<String>,
    pub resolution_media: Option<Vec<MediaFile>>,
}

/// Request DTO for the post-resolution citizen rating
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RateFeedbackDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    pub feedback_text: Option<String>,
}

/// Query params for listing feedback
#[derive(Debug, Deserialize, IntoParams)]
pub struct FeedbackListQuery {
    pub status: Option<FeedbackStatus>,
    pub category_id: Option<Uuid>,
    pub priority: Option<FeedbackPriority>,
    /// Honored for dept_head and admin callers only
    pub department: Option<String>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

/// Response DTO for a feedback report
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedbackResponseDto {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub status: FeedbackStatus,
    pub priority: FeedbackPriority,
    pub ai_urgency_score: Option<f64>,
    pub ai_sentiment: Option<String>,
    pub user_id: Option<Uuid>,
    pub is_anonymous: bool,
    #[schema(value_type = Option<Object>)]
    pub contact_info: Option<serde_json::Value>,
    pub location: Option<Location>,
    pub media_files: Vec<MediaFile>,
    pub assigned_to: Option<Uuid>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution_notes: Option<String>,
    pub resolution_media: Vec<MediaFile>,
    pub citizen_rating: Option<i32>,
    pub citizen_feedback_text: Option<String>,
}

impl From<Feedback> for FeedbackResponseDto {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id,
            title: f.title,
            description: f.description,
            category_id: f.category_id,
            status: f.status,
            priority: f.priority,
            ai_urgency_score: f.ai_urgency_score,
            ai_sentiment: f.ai_sentiment,
            user_id: f.user_id,
            is_anonymous: f.is_anonymous,
            contact_info: f.contact_info.map(|c| c.0),
            location: f.location.map(|l| l.0),
            media_files: f.media_files.0,
            assigned_to: f.assigned_to,
            assigned_at: f.assigned_at,
            department: f.department,
            created_at: f.created_at,
            updated_at: f.updated_at,
            resolved_at: f.resolved_at,
            resolution_notes: f.resolution_notes,
            resolution_media: f.resolution_media.0,
            citizen_rating: f.citizen_rating,
            citizen_feedback_text: f.citizen_feedback_text,
        }
    }
}
