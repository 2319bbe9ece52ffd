use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::progress_reports::dtos::{
    CreateProgressReportDto, ProgressReportQuery, ProgressReportResponseDto,
};
use crate::features::progress_reports::services::ProgressReportService;
use crate::shared::types::{ApiResponse, Meta};

/// List progress reports
#[utoipa::path(
    get,
    path = "/api/progress-reports",
    params(ProgressReportQuery),
    responses(
        (status = 200, description = "Progress reports, newest first", body = ApiResponse<Vec<ProgressReportResponseDto>>)
    ),
    tag = "progress-reports"
)]
pub async fn list_progress_reports(
    State(service): State<Arc<ProgressReportService>>,
    AppQuery(query): AppQuery<ProgressReportQuery>,
) -> Result<Json<ApiResponse<Vec<ProgressReportResponseDto>>>> {
    let reports = service.list(query.package_id).await?;
    let total = reports.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(reports),
        None,
        Some(Meta::total(total)),
    )))
}

/// Record a progress report
#[utoipa::path(
    post,
    path = "/api/admin/progress-reports",
    request_body = CreateProgressReportDto,
    responses(
        (status = 201, description = "Progress report recorded", body = ApiResponse<ProgressReportResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Package not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_progress_report(
    State(service): State<Arc<ProgressReportService>>,
    AppJson(dto): AppJson<CreateProgressReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProgressReportResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service.create(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Laporan progres berhasil disimpan".to_string()),
            None,
        )),
    ))
}
