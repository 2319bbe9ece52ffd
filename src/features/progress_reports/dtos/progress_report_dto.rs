use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::progress_reports::models::ProgressReport;

/// Response DTO for a progress report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReportResponseDto {
    pub id: i64,
    pub package_id: i64,
    pub package_name: Option<String>,
    pub percentage: i32,
    pub reported_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProgressReport> for ProgressReportResponseDto {
    fn from(r: ProgressReport) -> Self {
        Self {
            id: r.id,
            package_id: r.package_id,
            package_name: r.package_name,
            percentage: r.percentage,
            reported_on: r.reported_on,
            notes: r.notes,
            created_at: r.created_at,
        }
    }
}

/// Request DTO for recording field progress of a package
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgressReportDto {
    pub package_id: i64,

    #[validate(range(min = 0, max = 100, message = "Persentase harus 0-100"))]
    pub percentage: i32,

    #[schema(value_type = String, format = Date, example = "2025-06-30")]
    pub reported_on: NaiveDate,

    #[validate(length(max = 2000, message = "Catatan maksimal 2000 karakter"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Query parameters for listing progress reports
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressReportQuery {
    /// Only reports of this package
    pub package_id: Option<i64>,
}
