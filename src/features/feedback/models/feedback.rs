use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Feedback status enum matching database enum.
///
/// Transitions run pending -> in_progress -> resolved; rejected is reachable
/// from any non-terminal state. Resolved and rejected are terminal for
/// citizen-initiated mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "feedback_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackStatus::Pending => write!(f, "pending"),
            FeedbackStatus::InProgress => write!(f, "in_progress"),
            FeedbackStatus::Resolved => write!(f, "resolved"),
            FeedbackStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Feedback priority enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "feedback_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeedbackPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl FeedbackPriority {
    /// Derive the priority tier from an urgency score in [0, 1].
    ///
    /// Boundary-inclusive on the lower bound of each tier.
    pub fn from_urgency(score: f64) -> Self {
        if score >= 0.8 {
            FeedbackPriority::Urgent
        } else if score >= 0.6 {
            FeedbackPriority::High
        } else if score >= 0.4 {
            FeedbackPriority::Medium
        } else {
            FeedbackPriority::Low
        }
    }
}

impl std::fmt::Display for FeedbackPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackPriority::Low => write!(f, "low"),
            FeedbackPriority::Medium => write!(f, "medium"),
            FeedbackPriority::High => write!(f, "high"),
            FeedbackPriority::Urgent => write!(f, "urgent"),
        }
    }
}

/// Geolocation attached to a feedback report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

/// Opaque blob-store descriptor for an attached media file.
///
/// The core never touches bytes; upload and storage belong to the blob store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MediaFile {
    pub id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub file_size: i64,
    pub url: String,
}

/// Database model for a feedback report
#[derive(Debug, Clone, FromRow)]
pub struct Feedback {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub status: FeedbackStatus,
    pub priority: FeedbackPriority,
    pub ai_urgency_score: Option<f64>,
    pub ai_sentiment: Option<String>,
    /// None for anonymous submissions
    pub user_id: Option<Uuid>,
    pub is_anonymous: bool,
    /// Opaque contact payload supplied by anonymous submitters
    pub contact_info: Option<Json<serde_json::Value>>,
    pub location: Option<Json<Location>>,
    pub media_files: Json<Vec<MediaFile>>,
    pub assigned_to: Option<Uuid>,
    pub assigned_at: Option<DateTime<Utc>>,
    /// Copied from the category at creation; immutable afterwards
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution_notes: Option<String>,
    pub resolution_media: Json<Vec<MediaFile>>,
    pub citizen_rating: Option<i32>,
    pub citizen_feedback_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_tier_boundaries() {
        assert_eq!(FeedbackPriority::from_urgency(1.0), FeedbackPriority::Urgent);
        assert_eq!(FeedbackPriority::from_urgency(0.8), FeedbackPriority::Urgent);
        assert_eq!(FeedbackPriority::from_urgency(0.79), FeedbackPriority::High);
        assert_eq!(FeedbackPriority::from_urgency(0.6), FeedbackPriority::High);
        assert_eq!(FeedbackPriority::from_urgency(0.59), FeedbackPriority::Medium);
        assert_eq!(FeedbackPriority::from_urgency(0.4), FeedbackPriority::Medium);
        assert_eq!(FeedbackPriority::from_urgency(0.39), FeedbackPriority::Low);
        assert_eq!(FeedbackPriority::from_urgency(0.0), FeedbackPriority::Low);
    }

    #[test]
    fn test_keyword_fallback_score_maps_to_high() {
        // The 0.7 keyword-fallback score lands below the urgent threshold
        assert_eq!(FeedbackPriority::from_urgency(0.7), FeedbackPriority::High);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FeedbackStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<FeedbackStatus>("\"resolved\"").unwrap(),
            FeedbackStatus::Resolved
        );
    }
}
