use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::activity_logs::dtos::{ActivityLogResponseDto, CreateActivityLogDto};
use crate::features::activity_logs::models::ActivityLog;

/// Service for the admin activity log
pub struct ActivityLogService {
    pool: PgPool,
}

impl ActivityLogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List log entries, newest first (paginated)
    pub async fn list(&self, offset: i64, limit: i64) -> Result<(Vec<ActivityLogResponseDto>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count activity logs: {:?}", e);
                AppError::Database(e)
            })?;

        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT id, action, description, ip, created_at
            FROM activity_logs
            ORDER BY id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list activity logs: {:?}", e);
            AppError::Database(e)
        })?;

        Ok((logs.into_iter().map(Into::into).collect(), total))
    }

    pub async fn create(&self, dto: &CreateActivityLogDto) -> Result<ActivityLogResponseDto> {
        let log = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (action, description, ip)
            VALUES ($1, $2, $3)
            RETURNING id, action, description, ip, created_at
            "#,
        )
        .bind(dto.action.trim())
        .bind(&dto.description)
        .bind(&dto.ip)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write activity log '{}': {:?}", dto.action, e);
            AppError::Database(e)
        })?;

        Ok(log.into())
    }
}
