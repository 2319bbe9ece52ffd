use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::activity_logs::models::ActivityLog;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogResponseDto {
    pub id: i64,
    pub action: String,
    pub description: Option<String>,
    pub ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogResponseDto {
    fn from(l: ActivityLog) -> Self {
        Self {
            id: l.id,
            action: l.action,
            description: l.description,
            ip: l.ip,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateActivityLogDto {
    #[validate(
        length(min = 1, max = 100, message = "Aksi harus 1-100 karakter"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    #[schema(example = "import_csv")]
    pub action: String,

    #[validate(length(max = 1000, message = "Deskripsi maksimal 1000 karakter"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Client address, IPv4 or IPv6
    #[validate(ip(message = "Alamat IP tidak valid"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}
