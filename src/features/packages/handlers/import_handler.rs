use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::packages::dtos::{ImportPreviewDto, ImportResultDto, UploadCsvDto};
use crate::features::packages::services::ImportService;
use crate::shared::types::ApiResponse;

/// Import packages from a CSV export
///
/// Accepts multipart/form-data with a `file` field holding a tender or
/// swakelola export. The shape is detected from the headers.
#[utoipa::path(
    post,
    path = "/api/admin/packages/import",
    tag = "admin",
    request_body(
        content = UploadCsvDto,
        content_type = "multipart/form-data",
        description = "CSV export in the tender or swakelola shape",
    ),
    responses(
        (status = 200, description = "Import finished; failed inserts are listed", body = ApiResponse<ImportResultDto>),
        (status = 400, description = "Missing file, empty file or unrecognized format"),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "File too large")
    ),
    security(("basic_auth" = []))
)]
pub async fn import_packages(
    State(service): State<Arc<ImportService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportResultDto>>> {
    let bytes = read_csv_field(multipart).await?;
    let result = service.import(&bytes).await?;

    let message = format!(
        "{} paket berhasil diimpor, {} gagal",
        result.imported, result.failed
    );
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}

/// Parse a CSV export without saving it
#[utoipa::path(
    post,
    path = "/api/admin/packages/import/preview",
    tag = "admin",
    request_body(
        content = UploadCsvDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Detected format and package candidates", body = ApiResponse<ImportPreviewDto>),
        (status = 400, description = "Missing file, empty file or unrecognized format"),
        (status = 401, description = "Unauthorized")
    ),
    security(("basic_auth" = []))
)]
pub async fn preview_import(
    State(service): State<Arc<ImportService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<ImportPreviewDto>>> {
    let bytes = read_csv_field(multipart).await?;
    let preview = service.preview(&bytes)?;
    Ok(Json(ApiResponse::success(Some(preview), None, None)))
}

/// Bytes of the `file` field; other fields are ignored
async fn read_csv_field(mut multipart: Multipart) -> Result<Vec<u8>> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Gagal membaca data multipart: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Gagal membaca file: {}", e))
        })?;
        file_data = Some(data.to_vec());
    }

    file_data.ok_or_else(|| {
        AppError::BadRequest("Silakan pilih file CSV terlebih dahulu.".to_string())
    })
}
