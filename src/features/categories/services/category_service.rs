use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::audit::models::ACTION_CREATE;
use crate::features::audit::AuditService;
use crate::features::auth::models::User;
use crate::features::categories::dtos::{CategoryResponseDto, CreateCategoryDto};
use crate::features::categories::models::Category;

const CATEGORY_COLUMNS: &str =
    "id, name, description, department, icon, color, is_active, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
    audit: Arc<AuditService>,
}

impl CategoryService {
    pub fn new(pool: PgPool, audit: Arc<AuditService>) -> Self {
        Self { pool, audit }
    }

    /// List all active categories
    pub async fn list_active(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE is_active = TRUE ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Create a new category.
    ///
    /// Role restrictions are enforced at the route guard; name uniqueness is
    /// not enforced here (only the seed routine checks for existing names).
    pub async fn create(&self, dto: CreateCategoryDto, actor: &User) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, description, department, icon, color) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.department)
        .bind(&dto.icon)
        .bind(&dto.color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created category {} ({}) for department {}",
            category.id,
            category.name,
            category.department
        );

        let response = CategoryResponseDto::from(category);

        self.audit
            .record(
                Some(actor.id),
                ACTION_CREATE,
                "category",
                &response.id.to_string(),
                None,
                serde_json::to_value(&response).ok(),
            )
            .await;

        Ok(response)
    }
}
