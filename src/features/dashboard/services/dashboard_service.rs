use chrono::Utc;
use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};
use crate::features::auth::models::User;
use crate::features::dashboard::dtos::{
    CategoryVolumeDto, DashboardStatsDto, DepartmentVolumeDto, PublicStatsDto,
};
use crate::features::feedback::models::FeedbackScope;

#[derive(Debug, FromRow)]
struct StatusCounts {
    total: i64,
    pending: i64,
    in_progress: i64,
    resolved: i64,
    urgent: i64,
    high: i64,
    recent_week: i64,
}

/// Service for staff and public dashboard statistics
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Role-scoped statistics for the staff dashboard.
    ///
    /// Officers see only their own department; dept_head and admin see the
    /// whole collection.
    pub async fn private_stats(&self, caller: &User) -> Result<DashboardStatsDto> {
        let department = match FeedbackScope::for_user(caller) {
            FeedbackScope::Department(department) => Some(department),
            _ => None,
        };

        let counts = sqlx::query_as::<_, StatusCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'in_progress') AS in_progress,
                COUNT(*) FILTER (WHERE status = 'resolved') AS resolved,
                COUNT(*) FILTER (WHERE priority = 'urgent') AS urgent,
                COUNT(*) FILTER (WHERE priority = 'high') AS high,
                COUNT(*) FILTER (WHERE created_at >= NOW() - INTERVAL '7 days') AS recent_week
            FROM feedback
            WHERE ($1::text IS NULL OR department = $1)
            "#,
        )
        .bind(&department)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get dashboard stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(DashboardStatsDto {
            total_feedback: counts.total,
            pending_feedback: counts.pending,
            in_progress_feedback: counts.in_progress,
            resolved_feedback: counts.resolved,
            urgent_feedback: counts.urgent,
            high_priority_feedback: counts.high,
            recent_feedback_week: counts.recent_week,
            resolution_rate: resolution_rate(counts.resolved, counts.total),
        })
    }

    /// Global statistics for the public transparency dashboard
    pub async fn public_stats(&self) -> Result<PublicStatsDto> {
        let (total, resolved) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'resolved') FROM feedback",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get public stats counts: {:?}", e);
            AppError::Database(e)
        })?;

        let category_stats = sqlx::query_as::<_, CategoryVolumeDto>(
            r#"
            SELECT f.category_id, c.name, COUNT(*) AS count
            FROM feedback f
            LEFT JOIN categories c ON c.id = f.category_id
            GROUP BY f.category_id, c.name
            ORDER BY count DESC
            LIMIT 10
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category stats: {:?}", e);
            AppError::Database(e)
        })?;

        let department_stats = sqlx::query_as::<_, DepartmentVolumeDto>(
            r#"
            SELECT department, COUNT(*) AS count
            FROM feedback
            GROUP BY department
            ORDER BY count DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get department stats: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(PublicStatsDto {
            total_feedback: total,
            resolved_feedback: resolved,
            resolution_rate: resolution_rate(resolved, total),
            category_stats,
            department_stats,
            last_updated: Utc::now(),
        })
    }
}

/// resolved / total * 100, rounded to 2 decimals. Zero when the collection
/// is empty.
fn resolution_rate(resolved: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = resolved as f64 / total as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_rate_zero_when_empty() {
        assert_eq!(resolution_rate(0, 0), 0.0);
    }

    #[test]
    fn test_resolution_rate_three_of_eight() {
        assert_eq!(resolution_rate(3, 8), 37.5);
    }

    #[test]
    fn test_resolution_rate_rounds_to_two_decimals() {
        // 1/3 = 33.333...% -> 33.33
        assert_eq!(resolution_rate(1, 3), 33.33);
        // 2/3 = 66.666...% -> 66.67
        assert_eq!(resolution_rate(2, 3), 66.67);
    }

    #[test]
    fn test_resolution_rate_full() {
        assert_eq!(resolution_rate(5, 5), 100.0);
    }
}
