use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

pub const ACTION_CREATE: &str = "CREATE";
pub const ACTION_UPDATE: &str = "UPDATE";
pub const ACTION_LOGIN: &str = "LOGIN";
pub const ACTION_INITIALIZE: &str = "INITIALIZE";

/// Database model for an audit trail entry.
///
/// Rows are append-only: nothing in the application mutates or deletes them.
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct AuditLog {
    pub id: Uuid,
    /// None for system actions
    pub user_id: Option<Uuid>,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub old_data: Option<Value>,
    pub new_data: Option<Value>,
    pub created_at: DateTime<Utc>,
}
