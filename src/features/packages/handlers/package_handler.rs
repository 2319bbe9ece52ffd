use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::packages::dtos::{
    MapMarkerDto, PackageFilter, PackageFilterQuery, PackageInputDto, PackageResponseDto,
    PackageStatsDto,
};
use crate::features::packages::models::NewPackage;
use crate::features::packages::services::PackageService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// Number of packages shown in the dashboard slider
const FEATURED_COUNT: i64 = 5;

// ==================== Public Handlers ====================

/// List packages (paginated, filterable)
#[utoipa::path(
    get,
    path = "/api/packages",
    params(PackageFilterQuery, PaginationQuery),
    responses(
        (status = 200, description = "List of packages", body = ApiResponse<Vec<PackageResponseDto>>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "packages"
)]
pub async fn list_packages(
    State(service): State<Arc<PackageService>>,
    AppQuery(filter): AppQuery<PackageFilterQuery>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<PackageResponseDto>>>> {
    let filter = PackageFilter::try_from(filter)?;
    let (items, total) = service
        .list(&filter, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta::paged(total, &pagination)),
    )))
}

/// Get a package by id
#[utoipa::path(
    get,
    path = "/api/packages/{id}",
    params(
        ("id" = i64, Path, description = "Package ID")
    ),
    responses(
        (status = 200, description = "Package details", body = ApiResponse<PackageResponseDto>),
        (status = 404, description = "Package not found")
    ),
    tag = "packages"
)]
pub async fn get_package(
    State(service): State<Arc<PackageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PackageResponseDto>>> {
    let package = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(package), None, None)))
}

/// Dashboard statistics for the filtered packages
#[utoipa::path(
    get,
    path = "/api/packages/stats",
    params(PackageFilterQuery),
    responses(
        (status = 200, description = "Summary and breakdowns", body = ApiResponse<PackageStatsDto>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "packages"
)]
pub async fn package_stats(
    State(service): State<Arc<PackageService>>,
    AppQuery(filter): AppQuery<PackageFilterQuery>,
) -> Result<Json<ApiResponse<PackageStatsDto>>> {
    let filter = PackageFilter::try_from(filter)?;
    let stats = service.stats(&filter).await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Map markers for the filtered packages
#[utoipa::path(
    get,
    path = "/api/packages/map",
    params(PackageFilterQuery),
    responses(
        (status = 200, description = "Packages with valid coordinates", body = ApiResponse<Vec<MapMarkerDto>>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "packages"
)]
pub async fn map_markers(
    State(service): State<Arc<PackageService>>,
    AppQuery(filter): AppQuery<PackageFilterQuery>,
) -> Result<Json<ApiResponse<Vec<MapMarkerDto>>>> {
    let filter = PackageFilter::try_from(filter)?;
    let markers = service.map_markers(&filter).await?;
    let total = markers.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(markers),
        None,
        Some(Meta::total(total)),
    )))
}

/// Packages with the largest budgets
#[utoipa::path(
    get,
    path = "/api/packages/featured",
    responses(
        (status = 200, description = "Top packages by budget", body = ApiResponse<Vec<PackageResponseDto>>)
    ),
    tag = "packages"
)]
pub async fn featured_packages(
    State(service): State<Arc<PackageService>>,
) -> Result<Json<ApiResponse<Vec<PackageResponseDto>>>> {
    let packages = service.featured(FEATURED_COUNT).await?;
    Ok(Json(ApiResponse::success(Some(packages), None, None)))
}

/// OPD names for the filter dropdown
#[utoipa::path(
    get,
    path = "/api/packages/opd-options",
    responses(
        (status = 200, description = "\"Semua OPD\" followed by the distinct OPD names", body = ApiResponse<Vec<String>>)
    ),
    tag = "packages"
)]
pub async fn opd_options(
    State(service): State<Arc<PackageService>>,
) -> Result<Json<ApiResponse<Vec<String>>>> {
    let options = service.opd_options().await?;
    Ok(Json(ApiResponse::success(Some(options), None, None)))
}

// ==================== Admin Handlers ====================

/// Create a package
#[utoipa::path(
    post,
    path = "/api/admin/packages",
    request_body = PackageInputDto,
    responses(
        (status = 201, description = "Package created", body = ApiResponse<PackageResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn create_package(
    State(service): State<Arc<PackageService>>,
    AppJson(dto): AppJson<PackageInputDto>,
) -> Result<(StatusCode, Json<ApiResponse<PackageResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let package = service.create(&NewPackage::from(dto)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(package),
            Some("Paket berhasil ditambahkan".to_string()),
            None,
        )),
    ))
}

/// Replace a package
#[utoipa::path(
    put,
    path = "/api/admin/packages/{id}",
    params(
        ("id" = i64, Path, description = "Package ID")
    ),
    request_body = PackageInputDto,
    responses(
        (status = 200, description = "Package updated", body = ApiResponse<PackageResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Package not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn update_package(
    State(service): State<Arc<PackageService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<PackageInputDto>,
) -> Result<Json<ApiResponse<PackageResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let package = service.update(id, &NewPackage::from(dto)).await?;
    Ok(Json(ApiResponse::success(
        Some(package),
        Some("Paket berhasil diperbarui".to_string()),
        None,
    )))
}

/// Delete a package
#[utoipa::path(
    delete,
    path = "/api/admin/packages/{id}",
    params(
        ("id" = i64, Path, description = "Package ID")
    ),
    responses(
        (status = 200, description = "Package deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Package not found")
    ),
    tag = "admin",
    security(("basic_auth" = []))
)]
pub async fn delete_package(
    State(service): State<Arc<PackageService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Paket berhasil dihapus".to_string()),
        None,
    )))
}
