use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::references::dtos::ReferenceResponseDto;
use crate::features::references::models::{Reference, ReferenceKind};

/// Service for the OPD, provider and selection method tables
pub struct ReferenceService {
    pool: PgPool,
}

impl ReferenceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List entries of `kind` in insertion order
    pub async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceResponseDto>> {
        // table names come from a closed enum, never from input
        let sql = format!(
            "SELECT id, name, created_at FROM {} ORDER BY id ASC",
            kind.table()
        );

        let rows = sqlx::query_as::<_, Reference>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list {}: {:?}", kind.table(), e);
                AppError::Database(e)
            })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Add an entry; names are unique per table
    pub async fn create(&self, kind: ReferenceKind, name: &str) -> Result<ReferenceResponseDto> {
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name, created_at",
            kind.table()
        );

        let name = name.trim();
        let row = sqlx::query_as::<_, Reference>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create {} '{}': {:?}", kind.table(), name, e);
                AppError::from_write(
                    e,
                    &format!("{} '{}' sudah ada", kind.label(), name),
                    &format!("{} tidak ditemukan", kind.label()),
                )
            })?;

        tracing::info!("Created {} {} '{}'", kind.table(), row.id, row.name);
        Ok(row.into())
    }
}
