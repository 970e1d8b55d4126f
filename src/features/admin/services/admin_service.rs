use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::audit::models::ACTION_INITIALIZE;
use crate::features::audit::AuditService;
use crate::features::auth::models::User;

struct DefaultCategory {
    name: &'static str,
    description: &'static str,
    department: &'static str,
    icon: &'static str,
    color: &'static str,
}

const DEFAULT_CATEGORIES: [DefaultCategory; 6] = [
    DefaultCategory {
        name: "Roads & Infrastructure",
        description: "Potholes, traffic signals, road maintenance",
        department: "Public Works",
        icon: "road",
        color: "#3B82F6",
    },
    DefaultCategory {
        name: "Water & Sanitation",
        description: "Water supply, drainage, sewage issues",
        department: "Water Department",
        icon: "droplets",
        color: "#06B6D4",
    },
    DefaultCategory {
        name: "Public Safety",
        description: "Police, fire safety, emergency services",
        department: "Police Department",
        icon: "shield",
        color: "#EF4444",
    },
    DefaultCategory {
        name: "Healthcare",
        description: "Public health services, hospitals, clinics",
        department: "Health Department",
        icon: "heart",
        color: "#10B981",
    },
    DefaultCategory {
        name: "Education",
        description: "Schools, libraries, educational facilities",
        department: "Education Department",
        icon: "book",
        color: "#8B5CF6",
    },
    DefaultCategory {
        name: "Utilities",
        description: "Electricity, gas, telecommunications",
        department: "Utilities Department",
        icon: "zap",
        color: "#F59E0B",
    },
];

/// Service for admin-triggered initialization
pub struct AdminService {
    pool: PgPool,
    audit: Arc<AuditService>,
}

impl AdminService {
    pub fn new(pool: PgPool, audit: Arc<AuditService>) -> Self {
        Self { pool, audit }
    }

    /// Seed the default categories.
    ///
    /// Idempotent by name: a category whose name already exists is skipped.
    /// Returns the number of categories inserted.
    pub async fn init_default_data(&self, actor: &User) -> Result<u64> {
        let mut inserted = 0;

        for category in &DEFAULT_CATEGORIES {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM categories WHERE name = $1)",
            )
            .bind(category.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to check category existence: {:?}", e);
                AppError::Database(e)
            })?;

            if exists {
                continue;
            }

            sqlx::query(
                "INSERT INTO categories (name, description, department, icon, color) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(category.name)
            .bind(category.description)
            .bind(category.department)
            .bind(category.icon)
            .bind(category.color)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to seed category {}: {:?}", category.name, e);
                AppError::Database(e)
            })?;

            inserted += 1;
        }

        tracing::info!("Default data initialized ({} categories inserted)", inserted);

        self.audit
            .record(
                Some(actor.id),
                ACTION_INITIALIZE,
                "system",
                "default-data",
                None,
                None,
            )
            .await;

        Ok(inserted)
    }
}
