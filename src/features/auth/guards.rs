//! Role-based authorization guards for the application.
//!
//! These guards extract the authenticated user and verify they have the
//! required role level.
//!
//! Role hierarchy (from highest to lowest):
//! - admin: Full access, including default-data seeding
//! - dept_head: Sees all feedback across departments, manages categories
//! - officer: Triages feedback within own department
//! - citizen: Submits feedback and tracks own reports
//!
//! Each higher role includes all permissions of lower roles.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::error::AppError;
use crate::features::auth::models::User;

/// Guard for checking if user is admin.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub User);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = <User as FromRequestParts<S>>::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

/// Guard for checking if user has department-head level access.
///
/// Allows users with the "admin" or "dept_head" roles. Use this for
/// category management operations.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireDeptHead(user): RequireDeptHead) { ... }
/// ```
pub struct RequireDeptHead(pub User);

impl<S> FromRequestParts<S> for RequireDeptHead
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = <User as FromRequestParts<S>>::from_request_parts(parts, state).await?;

        if !user.has_dept_head_access() {
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }

        Ok(RequireDeptHead(user))
    }
}

/// Guard for checking if user has officer-level (staff) access.
///
/// Allows users with the "admin", "dept_head", or "officer" roles. Use this
/// for feedback triage and staff dashboard operations.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireOfficer(user): RequireOfficer) { ... }
/// ```
pub struct RequireOfficer(pub User);

impl<S> FromRequestParts<S> for RequireOfficer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = <User as FromRequestParts<S>>::from_request_parts(parts, state).await?;

        if !user.has_officer_access() {
            return Err(AppError::Forbidden("Insufficient permissions".to_string()));
        }

        Ok(RequireOfficer(user))
    }
}
