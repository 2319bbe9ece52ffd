use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::references::models::Reference;

/// Response DTO for an OPD, provider or selection method
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceResponseDto {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Reference> for ReferenceResponseDto {
    fn from(r: Reference) -> Self {
        Self {
            id: r.id,
            name: r.name,
            created_at: r.created_at,
        }
    }
}

/// Request DTO for adding a reference entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReferenceDto {
    #[validate(
        length(min = 1, max = 255, message = "Nama harus 1-255 karakter"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    #[schema(example = "Dinas Perhubungan")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_length() {
        let ok = CreateReferenceDto {
            name: "Dinas Perhubungan".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreateReferenceDto {
            name: String::new(),
        };
        assert!(empty.validate().is_err());

        let blank = CreateReferenceDto {
            name: "  ".to_string(),
        };
        assert!(blank.validate().is_err());

        let long = CreateReferenceDto {
            name: "x".repeat(256),
        };
        assert!(long.validate().is_err());
    }
}
