use serde::Serialize;
use utoipa::ToSchema;

use crate::features::packages::csv::SourceFormat;
use crate::features::packages::models::NewPackage;

/// Multipart form for CSV import (schema only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadCsvDto {
    /// CSV export (tender or swakelola shape)
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportResultDto {
    pub format: SourceFormat,
    /// Data rows read from the file
    pub rows_read: usize,
    /// Rows dropped for having no package name
    pub rows_skipped: usize,
    pub imported: usize,
    pub failed: usize,
    /// One message per failed insert
    pub errors: Vec<String>,
    /// Ids of the inserted packages, in source order
    pub ids: Vec<i64>,
}

/// Parsed candidates of a CSV file, without persisting them
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreviewDto {
    pub format: SourceFormat,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub packages: Vec<ImportCandidateDto>,
}

/// Package candidate with its derived progress
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportCandidateDto {
    #[serde(flatten)]
    pub package: NewPackage,
    pub progress: i32,
}

impl From<NewPackage> for ImportCandidateDto {
    fn from(package: NewPackage) -> Self {
        Self {
            progress: package.progress(),
            package,
        }
    }
}
