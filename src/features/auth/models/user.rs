use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// User role enum matching database enum.
///
/// Role hierarchy (from highest to lowest):
/// - admin: Full access, including default-data seeding
/// - dept_head: Sees all feedback, manages categories
/// - officer: Triage within own department only
/// - citizen: Submits feedback and tracks own reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Citizen,
    Officer,
    DeptHead,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Citizen => write!(f, "citizen"),
            UserRole::Officer => write!(f, "officer"),
            UserRole::DeptHead => write!(f, "dept_head"),
            UserRole::Admin => write!(f, "admin"),
        }
    }
}

/// Database model for a user account.
///
/// The authenticated request user is this record, re-fetched per request so
/// deactivation and role changes take effect without re-login.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has officer-level access (officer, dept_head, or admin)
    pub fn has_officer_access(&self) -> bool {
        matches!(
            self.role,
            UserRole::Officer | UserRole::DeptHead | UserRole::Admin
        )
    }

    /// Check if user has department-head-level access (dept_head or admin)
    pub fn has_dept_head_access(&self) -> bool {
        matches!(self.role, UserRole::DeptHead | UserRole::Admin)
    }

    /// Check if user is admin
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

/// Why bearer-token authentication failed for this request.
///
/// Routes that allow anonymous access run the optional auth middleware,
/// which records the failure instead of rejecting the request; extractors
/// that do require a user turn it back into the matching error so the
/// distinct signal is not lost.
#[derive(Debug, Clone, Copy)]
pub enum AuthFailure {
    TokenExpired,
    TokenInvalid,
    AccountDisabled,
}

impl AuthFailure {
    pub fn from_error(error: &AppError) -> Option<Self> {
        match error {
            AppError::TokenExpired => Some(AuthFailure::TokenExpired),
            AppError::TokenInvalid => Some(AuthFailure::TokenInvalid),
            AppError::AccountDisabled => Some(AuthFailure::AccountDisabled),
            _ => None,
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::TokenExpired => AppError::TokenExpired,
            AuthFailure::TokenInvalid => AppError::TokenInvalid,
            AuthFailure::AccountDisabled => AppError::AccountDisabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::user_fixture;

    #[test]
    fn test_role_hierarchy() {
        let citizen = user_fixture(UserRole::Citizen, None);
        assert!(!citizen.has_officer_access());
        assert!(!citizen.has_dept_head_access());
        assert!(!citizen.is_admin());

        let officer = user_fixture(UserRole::Officer, Some("Water Department"));
        assert!(officer.has_officer_access());
        assert!(!officer.has_dept_head_access());

        let dept_head = user_fixture(UserRole::DeptHead, None);
        assert!(dept_head.has_officer_access());
        assert!(dept_head.has_dept_head_access());
        assert!(!dept_head.is_admin());

        let admin = user_fixture(UserRole::Admin, None);
        assert!(admin.has_officer_access());
        assert!(admin.has_dept_head_access());
        assert!(admin.is_admin());
    }

    #[test]
    fn test_role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::DeptHead).unwrap(),
            "\"dept_head\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"citizen\"").unwrap(),
            UserRole::Citizen
        );
    }
}
