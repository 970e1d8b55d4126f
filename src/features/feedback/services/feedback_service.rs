use std::sync::Arc;

use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::audit::models::{ACTION_CREATE, ACTION_UPDATE};
use crate::features::audit::AuditService;
use crate::features::auth::models::User;
use crate::features::categories::models::Category;
use crate::features::feedback::dtos::{
    CreateFeedbackDto, FeedbackListQuery, FeedbackResponseDto, RateFeedbackDto, UpdateFeedbackDto,
};
use crate::features::feedback::models::{Feedback, FeedbackPriority, FeedbackScope, FeedbackStatus};
use crate::features::feedback::services::analyzer_service::{Analysis, AnalyzerService};
use crate::features::realtime::events::{
    LifecycleEvent, EVENT_FEEDBACK_UPDATED, EVENT_NEW_FEEDBACK,
};
use crate::features::realtime::ConnectionManager;
use crate::shared::constants::MAX_LIST_LIMIT;

const FEEDBACK_COLUMNS: &str = "id, title, description, category_id, status, priority, \
     ai_urgency_score, ai_sentiment, user_id, is_anonymous, contact_info, location, \
     media_files, assigned_to, assigned_at, department, created_at, updated_at, \
     resolved_at, resolution_notes, resolution_media, citizen_rating, citizen_feedback_text";

/// Service for the feedback lifecycle: intake, role-scoped reads, staff
/// triage, and the post-resolution citizen rating.
pub struct FeedbackService {
    pool: PgPool,
    analyzer: Arc<AnalyzerService>,
    audit: Arc<AuditService>,
    notifier: Arc<ConnectionManager>,
}

impl FeedbackService {
    pub fn new(
        pool: PgPool,
        analyzer: Arc<AnalyzerService>,
        audit: Arc<AuditService>,
        notifier: Arc<ConnectionManager>,
    ) -> Self {
        Self {
            pool,
            analyzer,
            audit,
            notifier,
        }
    }

    /// Create a feedback report from a citizen submission.
    ///
    /// The owning department is copied from the category and never changes
    /// afterwards. Priority is derived from the urgency score, replacing any
    /// caller-supplied value. Analyzer failure never blocks the submission.
    pub async fn create(
        &self,
        dto: CreateFeedbackDto,
        caller: Option<&User>,
    ) -> Result<FeedbackResponseDto> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, department, icon, color, is_active, \
             created_at, updated_at \
             FROM categories WHERE id = $1",
        )
        .bind(dto.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve category: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or(AppError::InvalidCategory)?;

        // The whole analysis step is time-bounded; past the budget the fixed
        // neutral default applies.
        let analysis = match tokio::time::timeout(
            self.analyzer.analysis_budget(),
            self.analyzer.analyze(&dto.title, &dto.description),
        )
        .await
        {
            Ok(analysis) => analysis,
            Err(_) => {
                tracing::warn!("Feedback analysis exceeded its time budget, using neutral default");
                Analysis::neutral()
            }
        };

        let priority = FeedbackPriority::from_urgency(analysis.urgency);
        if dto.priority.is_some_and(|p| p != priority) {
            tracing::debug!(
                "Caller-supplied priority {} replaced by derived {}",
                dto.priority.unwrap(),
                priority
            );
        }

        let user_id = if dto.is_anonymous {
            None
        } else {
            caller.map(|u| u.id)
        };

        let feedback = sqlx::query_as::<_, Feedback>(&format!(
            "INSERT INTO feedback (title, description, category_id, priority, \
             ai_urgency_score, ai_sentiment, user_id, is_anonymous, contact_info, \
             location, media_files, department) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.category_id)
        .bind(priority)
        .bind(analysis.urgency)
        .bind(analysis.sentiment.to_string())
        .bind(user_id)
        .bind(dto.is_anonymous)
        .bind(dto.contact_info.map(Json))
        .bind(dto.location.map(Json))
        .bind(Json(dto.media_files))
        .bind(&category.department)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create feedback: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created feedback {} in department {} with priority {}",
            feedback.id,
            category.department,
            feedback.priority
        );

        let response = FeedbackResponseDto::from(feedback);

        self.audit
            .record(
                user_id,
                ACTION_CREATE,
                "feedback",
                &response.id.to_string(),
                None,
                serde_json::to_value(&response).ok(),
            )
            .await;

        self.notifier
            .broadcast_to_staff(&LifecycleEvent::new(EVENT_NEW_FEEDBACK, &response))
            .await;

        Ok(response)
    }

    /// List feedback visible to the caller, newest first.
    ///
    /// The caller's role decides the base scope; status, category, priority
    /// (and department, for dept_head/admin) narrow it further.
    pub async fn list(
        &self,
        query: &FeedbackListQuery,
        caller: &User,
    ) -> Result<Vec<FeedbackResponseDto>> {
        let scope = FeedbackScope::for_user(caller);

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE 1=1"));

        match &scope {
            FeedbackScope::Own(user_id) => {
                qb.push(" AND user_id = ");
                qb.push_bind(*user_id);
            }
            FeedbackScope::Department(department) => {
                qb.push(" AND department = ");
                qb.push_bind(department.clone());
            }
            FeedbackScope::All => {
                if let Some(department) = &query.department {
                    qb.push(" AND department = ");
                    qb.push_bind(department.clone());
                }
            }
        }

        if let Some(status) = query.status {
            qb.push(" AND status = ");
            qb.push_bind(status);
        }
        if let Some(category_id) = query.category_id {
            qb.push(" AND category_id = ");
            qb.push_bind(category_id);
        }
        if let Some(priority) = query.priority {
            qb.push(" AND priority = ");
            qb.push_bind(priority);
        }

        let skip = query.skip.max(0);
        let limit = query.limit.clamp(1, MAX_LIST_LIMIT);

        qb.push(" ORDER BY created_at DESC OFFSET ");
        qb.push_bind(skip);
        qb.push(" LIMIT ");
        qb.push_bind(limit);

        let feedback = qb
            .build_query_as::<Feedback>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list feedback: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(feedback.into_iter().map(|f| f.into()).collect())
    }

    /// Get a single feedback report, enforcing the caller's visibility scope
    pub async fn get(&self, id: Uuid, caller: &User) -> Result<FeedbackResponseDto> {
        let feedback = self.get_by_id(id).await?;

        if !FeedbackScope::for_user(caller).allows(&feedback) {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        Ok(feedback.into())
    }

    /// Apply a staff triage patch. Only non-null fields are written.
    ///
    /// Transition side effects: status -> resolved stamps `resolved_at`;
    /// setting or changing the assignee stamps `assigned_at`; every update
    /// stamps `updated_at`.
    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateFeedbackDto,
        caller: &User,
    ) -> Result<FeedbackResponseDto> {
        let before = self.get_by_id(id).await?;

        if !FeedbackScope::for_user(caller).allows(&before) {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE feedback SET updated_at = NOW()");

        if let Some(status) = patch.status {
            qb.push(", status = ");
            qb.push_bind(status);
            if status == FeedbackStatus::Resolved {
                qb.push(", resolved_at = NOW()");
            }
        }
        if let Some(priority) = patch.priority {
            qb.push(", priority = ");
            qb.push_bind(priority);
        }
        if let Some(assigned_to) = patch.assigned_to {
            qb.push(", assigned_to = ");
            qb.push_bind(assigned_to);
            qb.push(", assigned_at = NOW()");
        }
        if let Some(notes) = &patch.resolution_notes {
            qb.push(", resolution_notes = ");
            qb.push_bind(notes.clone());
        }
        if let Some(media) = patch.resolution_media {
            qb.push(", resolution_media = ");
            qb.push_bind(Json(media));
        }

        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(format!(" RETURNING {FEEDBACK_COLUMNS}"));

        let updated = qb
            .build_query_as::<Feedback>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update feedback: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Feedback {} not found", id)))?;

        tracing::info!("Updated feedback {} (status: {})", id, updated.status);

        let before_dto = FeedbackResponseDto::from(before);
        let response = FeedbackResponseDto::from(updated);

        self.audit
            .record(
                Some(caller.id),
                ACTION_UPDATE,
                "feedback",
                &response.id.to_string(),
                serde_json::to_value(&before_dto).ok(),
                serde_json::to_value(&response).ok(),
            )
            .await;

        self.notifier
            .broadcast_to_staff(&LifecycleEvent::new(EVENT_FEEDBACK_UPDATED, &response))
            .await;

        Ok(response)
    }

    /// Record the owning citizen's rating of a resolved report
    pub async fn rate(
        &self,
        id: Uuid,
        dto: RateFeedbackDto,
        caller: &User,
    ) -> Result<FeedbackResponseDto> {
        let before = self.get_by_id(id).await?;

        if before.user_id != Some(caller.id) {
            return Err(AppError::Forbidden("Access denied".to_string()));
        }

        if before.status != FeedbackStatus::Resolved {
            return Err(AppError::BadRequest(
                "Only resolved feedback can be rated".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, Feedback>(&format!(
            "UPDATE feedback \
             SET citizen_rating = $2, citizen_feedback_text = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {FEEDBACK_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.rating)
        .bind(&dto.feedback_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to rate feedback: {:?}", e);
            AppError::Database(e)
        })?;

        let before_dto = FeedbackResponseDto::from(before);
        let response = FeedbackResponseDto::from(updated);

        self.audit
            .record(
                Some(caller.id),
                ACTION_UPDATE,
                "feedback",
                &response.id.to_string(),
                serde_json::to_value(&before_dto).ok(),
                serde_json::to_value(&response).ok(),
            )
            .await;

        Ok(response)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Feedback> {
        sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get feedback: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Feedback {} not found", id)))
    }
}
