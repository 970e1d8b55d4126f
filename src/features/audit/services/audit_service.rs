use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// Service for the append-only audit trail.
///
/// Writes are best-effort: a failed insert is surfaced to operators through
/// the error log but never fails or rolls back the primary mutation.
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record who did what to which resource, with optional before/after
    /// snapshots.
    pub async fn record(
        &self,
        user_id: Option<Uuid>,
        action: &str,
        resource_type: &str,
        resource_id: &str,
        old_data: Option<Value>,
        new_data: Option<Value>,
    ) {
        let result = sqlx::query(
            "INSERT INTO audit_logs (user_id, action, resource_type, resource_id, old_data, new_data) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(user_id)
        .bind(action)
        .bind(resource_type)
        .bind(resource_id)
        .bind(old_data)
        .bind(new_data)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            tracing::error!(
                action,
                resource_type,
                resource_id,
                "Failed to write audit log entry: {:?}",
                e
            );
        }
    }
}
