use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::references::dtos::{CreateReferenceDto, ReferenceResponseDto};
use crate::features::references::models::ReferenceKind;
use crate::features::references::services::ReferenceService;
use crate::shared::types::{ApiResponse, Meta};

type ListResponse = Result<Json<ApiResponse<Vec<ReferenceResponseDto>>>>;
type CreateResponse = Result<(StatusCode, Json<ApiResponse<ReferenceResponseDto>>)>;

async fn list(service: &ReferenceService, kind: ReferenceKind) -> ListResponse {
    let items = service.list(kind).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::total(total)),
    )))
}

async fn create(
    service: &ReferenceService,
    kind: ReferenceKind,
    dto: CreateReferenceDto,
) -> CreateResponse {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let item = service.create(kind, &dto.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some(format!("{} berhasil ditambahkan", kind.label())),
            None,
        )),
    ))
}

// ==================== OPD ====================

/// List OPD (government work units)
#[utoipa::path(
    get,
    path = "/api/opd",
    responses(
        (status = 200, description = "List of OPD", body = ApiResponse<Vec<ReferenceResponseDto>>)
    ),
    tag = "references"
)]
pub async fn list_opd(State(service): State<Arc<ReferenceService>>) -> ListResponse {
    list(&service, ReferenceKind::Opd).await
}

/// Add an OPD
#[utoipa::path(
    post,
    path = "/api/admin/opd",
    request_body = CreateReferenceDto,
    responses(
        (status = 201, description = "OPD created", body = ApiResponse<ReferenceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Name already exists")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_opd(
    State(service): State<Arc<ReferenceService>>,
    AppJson(dto): AppJson<CreateReferenceDto>,
) -> CreateResponse {
    create(&service, ReferenceKind::Opd, dto).await
}

// ==================== Providers ====================

/// List providers (contractors)
#[utoipa::path(
    get,
    path = "/api/providers",
    responses(
        (status = 200, description = "List of providers", body = ApiResponse<Vec<ReferenceResponseDto>>)
    ),
    tag = "references"
)]
pub async fn list_providers(State(service): State<Arc<ReferenceService>>) -> ListResponse {
    list(&service, ReferenceKind::Provider).await
}

/// Add a provider
#[utoipa::path(
    post,
    path = "/api/admin/providers",
    request_body = CreateReferenceDto,
    responses(
        (status = 201, description = "Provider created", body = ApiResponse<ReferenceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Name already exists")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_provider(
    State(service): State<Arc<ReferenceService>>,
    AppJson(dto): AppJson<CreateReferenceDto>,
) -> CreateResponse {
    create(&service, ReferenceKind::Provider, dto).await
}

// ==================== Selection Methods ====================

/// List procurement selection methods
#[utoipa::path(
    get,
    path = "/api/selection-methods",
    responses(
        (status = 200, description = "List of selection methods", body = ApiResponse<Vec<ReferenceResponseDto>>)
    ),
    tag = "references"
)]
pub async fn list_selection_methods(
    State(service): State<Arc<ReferenceService>>,
) -> ListResponse {
    list(&service, ReferenceKind::SelectionMethod).await
}

/// Add a selection method
#[utoipa::path(
    post,
    path = "/api/admin/selection-methods",
    request_body = CreateReferenceDto,
    responses(
        (status = 201, description = "Selection method created", body = ApiResponse<ReferenceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Name already exists")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_selection_method(
    State(service): State<Arc<ReferenceService>>,
    AppJson(dto): AppJson<CreateReferenceDto>,
) -> CreateResponse {
    create(&service, ReferenceKind::SelectionMethod, dto).await
}
