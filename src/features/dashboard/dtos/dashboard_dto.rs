use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Role-scoped statistics for the staff dashboard
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsDto {
    pub total_feedback: i64,
    pub pending_feedback: i64,
    pub in_progress_feedback: i64,
    pub resolved_feedback: i64,
    pub urgent_feedback: i64,
    pub high_priority_feedback: i64,
    /// Count created within the trailing 7 days
    pub recent_feedback_week: i64,
    /// resolved / total * 100, rounded to 2 decimals; 0 when total is 0
    pub resolution_rate: f64,
}

/// Feedback volume for one category (public dashboard)
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct CategoryVolumeDto {
    pub category_id: Uuid,
    pub name: Option<String>,
    pub count: i64,
}

/// Feedback volume for one department (public dashboard)
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct DepartmentVolumeDto {
    pub department: Option<String>,
    pub count: i64,
}

/// Aggregate statistics for the public transparency dashboard. No PII.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicStatsDto {
    pub total_feedback: i64,
    pub resolved_feedback: i64,
    pub resolution_rate: f64,
    /// Top 10 categories by volume
    pub category_stats: Vec<CategoryVolumeDto>,
    pub department_stats: Vec<DepartmentVolumeDto>,
    pub last_updated: DateTime<Utc>,
}
