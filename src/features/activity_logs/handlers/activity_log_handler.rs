use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::activity_logs::dtos::{ActivityLogResponseDto, CreateActivityLogDto};
use crate::features::activity_logs::services::ActivityLogService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List activity log entries (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/logs",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Log entries, newest first", body = ApiResponse<Vec<ActivityLogResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn list_logs(
    State(service): State<Arc<ActivityLogService>>,
    AppQuery(params): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ActivityLogResponseDto>>>> {
    let (items, total) = service.list(params.offset(), params.limit()).await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paged(total, &params)),
    )))
}

/// Write an activity log entry
#[utoipa::path(
    post,
    path = "/api/admin/logs",
    request_body = CreateActivityLogDto,
    responses(
        (status = 201, description = "Entry written", body = ApiResponse<ActivityLogResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_log(
    State(service): State<Arc<ActivityLogService>>,
    AppJson(dto): AppJson<CreateActivityLogDto>,
) -> Result<(StatusCode, Json<ApiResponse<ActivityLogResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let log = service.create(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(log), None, None)),
    ))
}
