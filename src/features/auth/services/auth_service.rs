use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::audit::models::{ACTION_CREATE, ACTION_LOGIN};
use crate::features::audit::AuditService;
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, RegisterRequestDto, UserResponseDto,
};
use crate::features::auth::models::{User, UserRole};
use crate::features::auth::services::password;
use crate::features::auth::services::TokenService;

const USER_COLUMNS: &str = "id, email, password_hash, full_name, phone, role, department, \
     is_active, created_at, updated_at";

/// Service for account registration, login, and bearer-token authentication
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
    audit: Arc<AuditService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>, audit: Arc<AuditService>) -> Self {
        Self {
            pool,
            tokens,
            audit,
        }
    }

    /// Register a new account and return it together with an access token
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&dto.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check email existence: {:?}", e);
            AppError::Database(e)
        })?;

        if exists {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = password::hash_password(&dto.password)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;

        let role = dto.role.unwrap_or(UserRole::Citizen);

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, full_name, phone, role, department) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(&dto.full_name)
        .bind(&dto.phone)
        .bind(role)
        .bind(&dto.department)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Lost the existence-check race; same outcome as the early return
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicateEmail,
            _ => {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Registered user {} with role {}", user.id, user.role);

        let token = self.tokens.issue(&user)?;

        self.audit
            .record(
                Some(user.id),
                ACTION_CREATE,
                "user",
                &user.id.to_string(),
                None,
                serde_json::to_value(UserResponseDto::from(user.clone())).ok(),
            )
            .await;

        Ok(AuthResponseDto::new(user, token))
    }

    /// Validate credentials and return the user with a fresh access token
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(&dto.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch user by email: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or(AppError::InvalidCredentials)?;

        let verified = password::verify_password(&dto.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))?;

        if !verified {
            return Err(AppError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        let token = self.tokens.issue(&user)?;

        self.audit
            .record(
                Some(user.id),
                ACTION_LOGIN,
                "user",
                &user.id.to_string(),
                None,
                None,
            )
            .await;

        Ok(AuthResponseDto::new(user, token))
    }

    /// Resolve a bearer token to the current user record.
    ///
    /// The user row is re-fetched on every call rather than trusted from the
    /// claims, so deactivation takes effect without waiting for the token to
    /// expire.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let claims = self.tokens.decode(token)?;

        let user = self
            .get_by_id(claims.sub)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user by id: {:?}", e);
                AppError::Database(e)
            })
    }
}
