use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::packages::models::{
    Coordinates, NewPackage, Package, PackageStatus, ProcurementType,
};
use crate::shared::constants::{ALL_OPD_OPTION, ALL_STATUS_OPTION, ALL_TYPES_OPTION};

/// Response DTO for a package
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponseDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub procurement_type: ProcurementType,
    pub location: String,
    pub coordinates: Coordinates,
    pub budget: i64,
    pub hps: i64,
    pub realization: i64,
    /// Percent of the budget realized, derived from the amounts
    pub progress: i32,
    pub status: PackageStatus,
    pub provider_name: String,
    pub provider_address: String,
    pub opd_name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Package> for PackageResponseDto {
    fn from(p: Package) -> Self {
        Self {
            coordinates: p.coordinates(),
            progress: p.progress(),
            id: p.id,
            name: p.name,
            procurement_type: p.procurement_type,
            location: p.location,
            budget: p.budget,
            hps: p.hps,
            realization: p.realization,
            status: p.status,
            provider_name: p.provider_name,
            provider_address: p.provider_address,
            opd_name: p.opd_name,
            image_url: p.image_url,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoordinatesDto {
    #[validate(custom(function = "crate::shared::validation::validate_latitude"))]
    pub lat: f64,

    #[validate(custom(function = "crate::shared::validation::validate_longitude"))]
    pub lon: f64,
}

/// Request DTO for creating or replacing a package.
///
/// Every field except `imageUrl` is required. Progress is never accepted
/// from input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageInputDto {
    #[validate(
        length(max = 500, message = "Nama paket maksimal 500 karakter"),
        custom(function = "crate::shared::validation::validate_not_blank")
    )]
    pub name: String,

    #[serde(rename = "type")]
    pub procurement_type: ProcurementType,

    #[validate(custom(function = "crate::shared::validation::validate_not_blank"))]
    pub location: String,

    #[validate(nested)]
    pub coordinates: CoordinatesDto,

    pub budget: i64,
    pub hps: i64,
    pub realization: i64,
    pub status: PackageStatus,

    #[validate(custom(function = "crate::shared::validation::validate_not_blank"))]
    pub provider_name: String,

    #[validate(custom(function = "crate::shared::validation::validate_not_blank"))]
    pub provider_address: String,

    #[validate(custom(function = "crate::shared::validation::validate_not_blank"))]
    pub opd_name: String,

    #[validate(length(max = 2048, message = "URL gambar maksimal 2048 karakter"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<PackageInputDto> for NewPackage {
    fn from(dto: PackageInputDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            procurement_type: dto.procurement_type,
            location: dto.location.trim().to_string(),
            coordinates: Coordinates {
                lat: dto.coordinates.lat,
                lon: dto.coordinates.lon,
            },
            budget: dto.budget,
            hps: dto.hps,
            realization: dto.realization,
            status: dto.status,
            provider_name: dto.provider_name.trim().to_string(),
            provider_address: dto.provider_address.trim().to_string(),
            opd_name: dto.opd_name.trim().to_string(),
            image_url: dto
                .image_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        }
    }
}

/// Dashboard filters shared by the list, stats and map endpoints.
///
/// `opd`, `type` and `status` accept the "Semua ..." option or an empty
/// value to mean no filter.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PackageFilterQuery {
    /// Case-insensitive match on name or location
    #[param(example = "irigasi")]
    pub search: Option<String>,

    /// Exact OPD name
    #[param(example = "Dinas Perhubungan")]
    pub opd: Option<String>,

    /// Procurement type, as wire value or label
    #[serde(rename = "type")]
    #[param(example = "tender")]
    pub procurement_type: Option<String>,

    /// Package status, as wire value or label
    #[param(example = "completed")]
    pub status: Option<String>,
}

/// Filters after the "all" options and blanks are resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageFilter {
    pub search: Option<String>,
    pub opd: Option<String>,
    pub procurement_type: Option<ProcurementType>,
    pub status: Option<PackageStatus>,
}

impl PackageFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl TryFrom<PackageFilterQuery> for PackageFilter {
    type Error = AppError;

    fn try_from(q: PackageFilterQuery) -> Result<Self> {
        let procurement_type = chosen(q.procurement_type, ALL_TYPES_OPTION)
            .map(|v| v.parse::<ProcurementType>())
            .transpose()
            .map_err(AppError::BadRequest)?;
        let status = chosen(q.status, ALL_STATUS_OPTION)
            .map(|v| v.parse::<PackageStatus>())
            .transpose()
            .map_err(AppError::BadRequest)?;

        Ok(Self {
            search: chosen(q.search, ""),
            opd: chosen(q.opd, ALL_OPD_OPTION),
            procurement_type,
            status,
        })
    }
}

/// Trimmed value unless it is blank or the "all" option
fn chosen(value: Option<String>, all_option: &str) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != all_option)
}

/// Marker for the map view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarkerDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub procurement_type: ProcurementType,
    pub status: PackageStatus,
    pub opd_name: String,
    pub budget: i64,
    pub progress: i32,
    pub coordinates: Coordinates,
}

impl MapMarkerDto {
    /// Marker for `package`, or `None` when its stored point is unusable
    pub fn from_package(package: Package) -> Option<Self> {
        let coordinates = package.coordinates();
        if !coordinates.is_valid() {
            return None;
        }
        Some(Self {
            progress: package.progress(),
            id: package.id,
            name: package.name,
            procurement_type: package.procurement_type,
            status: package.status,
            opd_name: package.opd_name,
            budget: package.budget,
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input_json() -> serde_json::Value {
        json!({
            "name": "Rehabilitasi Jaringan Irigasi D.I. Santong",
            "type": "tender",
            "location": "Provinsi Nusa Tenggara Barat",
            "coordinates": { "lat": -8.4, "lon": 116.3 },
            "budget": 3363011000i64,
            "hps": 3363011000i64,
            "realization": 2924397000i64,
            "status": "completed",
            "providerName": "CV. RIDHO GRAHA",
            "providerAddress": "Mataram",
            "opdName": "Dinas Pekerjaan Umum dan Penataan Ruang"
        })
    }

    #[test]
    fn test_valid_input() {
        let dto: PackageInputDto = serde_json::from_value(input_json()).unwrap();
        assert!(dto.validate().is_ok());

        let pkg = NewPackage::from(dto);
        assert_eq!(pkg.image_url, None);
        assert_eq!(pkg.progress(), 87);
    }

    #[test]
    fn test_blank_fields_rejected() {
        let mut value = input_json();
        value["providerName"] = json!("   ");
        let dto: PackageInputDto = serde_json::from_value(value).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("provider_name"));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let mut value = input_json();
        value["coordinates"] = json!({ "lat": -95.0, "lon": 116.3 });
        let dto: PackageInputDto = serde_json::from_value(value).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_coordinates_dto_checks_each_axis() {
        assert!(CoordinatesDto { lat: -8.58, lon: 116.12 }.validate().is_ok());

        let errors = CoordinatesDto { lat: -8.58, lon: 181.0 }
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("lon"));
        assert!(!errors.field_errors().contains_key("lat"));

        let errors = CoordinatesDto {
            lat: f64::NAN,
            lon: 116.12,
        }
        .validate()
        .unwrap_err();
        assert!(errors.field_errors().contains_key("lat"));
    }

    #[test]
    fn test_progress_is_not_accepted_from_input() {
        let mut value = input_json();
        value["progress"] = json!(3);
        let dto: PackageInputDto = serde_json::from_value(value).unwrap();
        assert_eq!(NewPackage::from(dto).progress(), 87);
    }

    #[test]
    fn test_filter_all_options_mean_no_filter() {
        let query = PackageFilterQuery {
            search: Some("  ".to_string()),
            opd: Some(ALL_OPD_OPTION.to_string()),
            procurement_type: Some(ALL_TYPES_OPTION.to_string()),
            status: Some(String::new()),
        };
        let filter = PackageFilter::try_from(query).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_filter_parses_labels() {
        let query = PackageFilterQuery {
            search: Some(" Irigasi ".to_string()),
            opd: Some("Dinas Perhubungan".to_string()),
            procurement_type: Some("Non-Tender".to_string()),
            status: Some("in_progress".to_string()),
        };
        let filter = PackageFilter::try_from(query).unwrap();
        assert_eq!(filter.search.as_deref(), Some("Irigasi"));
        assert_eq!(filter.opd.as_deref(), Some("Dinas Perhubungan"));
        assert_eq!(filter.procurement_type, Some(ProcurementType::NonTender));
        assert_eq!(filter.status, Some(PackageStatus::InProgress));
    }

    #[test]
    fn test_filter_rejects_unknown_type() {
        let query = PackageFilterQuery {
            procurement_type: Some("lelang".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            PackageFilter::try_from(query),
            Err(AppError::BadRequest(_))
        ));
    }
}
