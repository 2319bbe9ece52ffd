use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::progress_reports::dtos::{CreateProgressReportDto, ProgressReportResponseDto};
use crate::features::progress_reports::models::ProgressReport;

/// Service for package progress reports
pub struct ProgressReportService {
    pool: PgPool,
}

impl ProgressReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List reports, newest first, optionally for one package
    pub async fn list(&self, package_id: Option<i64>) -> Result<Vec<ProgressReportResponseDto>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT pr.id, pr.package_id, p.name AS package_name, pr.percentage,
                   pr.reported_on, pr.notes, pr.created_at
            FROM progress_reports pr
            LEFT JOIN packages p ON p.id = pr.package_id
            "#,
        );
        if let Some(id) = package_id {
            query.push(" WHERE pr.package_id = ").push_bind(id);
        }
        query.push(" ORDER BY pr.id DESC");

        let reports = query
            .build_query_as::<ProgressReport>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list progress reports: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(reports.into_iter().map(Into::into).collect())
    }

    /// Record a progress report for an existing package
    pub async fn create(&self, dto: &CreateProgressReportDto) -> Result<ProgressReportResponseDto> {
        let report = sqlx::query_as::<_, ProgressReport>(
            r#"
            WITH inserted AS (
                INSERT INTO progress_reports (package_id, percentage, reported_on, notes)
                VALUES ($1, $2, $3, $4)
                RETURNING id, package_id, percentage, reported_on, notes, created_at
            )
            SELECT i.id, i.package_id, p.name AS package_name, i.percentage,
                   i.reported_on, i.notes, i.created_at
            FROM inserted i
            LEFT JOIN packages p ON p.id = i.package_id
            "#,
        )
        .bind(dto.package_id)
        .bind(dto.percentage)
        .bind(dto.reported_on)
        .bind(&dto.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to create progress report for package {}: {:?}",
                dto.package_id,
                e
            );
            AppError::from_write(
                e,
                "Laporan progres sudah ada",
                &format!("Paket dengan id {} tidak ditemukan", dto.package_id),
            )
        })?;

        tracing::info!(
            "Recorded progress {}% for package {}",
            report.percentage,
            report.package_id
        );
        Ok(report.into())
    }
}
