use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Procurement mode of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "procurement_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProcurementType {
    Tender,
    NonTender,
    Swakelola,
}

impl ProcurementType {
    pub const ALL: [ProcurementType; 3] = [
        ProcurementType::Tender,
        ProcurementType::NonTender,
        ProcurementType::Swakelola,
    ];

    /// Label shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            ProcurementType::Tender => "Tender",
            ProcurementType::NonTender => "Non-Tender",
            ProcurementType::Swakelola => "Swakelola",
        }
    }
}

impl FromStr for ProcurementType {
    type Err = String;

    /// Accepts the wire value or the dashboard label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| {
                t.to_string().eq_ignore_ascii_case(needle) || t.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("Jenis pengadaan tidak dikenal: {}", needle))
    }
}

impl std::fmt::Display for ProcurementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcurementType::Tender => write!(f, "tender"),
            ProcurementType::NonTender => write!(f, "non_tender"),
            ProcurementType::Swakelola => write!(f, "swakelola"),
        }
    }
}

/// Lifecycle stage of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "package_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Planning,
    InProgress,
    Completed,
    Suspended,
    AtRisk,
}

impl PackageStatus {
    pub const ALL: [PackageStatus; 5] = [
        PackageStatus::Planning,
        PackageStatus::InProgress,
        PackageStatus::Completed,
        PackageStatus::Suspended,
        PackageStatus::AtRisk,
    ];

    /// Label shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            PackageStatus::Planning => "Perencanaan",
            PackageStatus::InProgress => "Dalam Proses",
            PackageStatus::Completed => "Selesai",
            PackageStatus::Suspended => "Ditunda",
            PackageStatus::AtRisk => "Beresiko",
        }
    }
}

impl FromStr for PackageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| {
                t.to_string().eq_ignore_ascii_case(needle) || t.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| format!("Status paket tidak dikenal: {}", needle))
    }
}

impl std::fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageStatus::Planning => write!(f, "planning"),
            PackageStatus::InProgress => write!(f, "in_progress"),
            PackageStatus::Completed => write!(f, "completed"),
            PackageStatus::Suspended => write!(f, "suspended"),
            PackageStatus::AtRisk => write!(f, "at_risk"),
        }
    }
}

/// WGS84 point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Percent of the budget already realized.
///
/// Always derived from the amounts: `round(realization / budget * 100)`,
/// or 0 when there is no budget.
pub fn compute_progress(budget: i64, realization: i64) -> i32 {
    if budget <= 0 {
        return 0;
    }
    let pct = (realization as f64 / budget as f64) * 100.0;
    // halves round towards +inf
    (pct + 0.5).floor() as i32
}

/// Package data without an id, as produced by the CSV import or a form
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    pub name: String,
    #[serde(rename = "type")]
    pub procurement_type: ProcurementType,
    pub location: String,
    pub coordinates: Coordinates,
    pub budget: i64,
    pub hps: i64,
    pub realization: i64,
    pub status: PackageStatus,
    pub provider_name: String,
    pub provider_address: String,
    pub opd_name: String,
    pub image_url: Option<String>,
}

impl NewPackage {
    pub fn progress(&self) -> i32 {
        compute_progress(self.budget, self.realization)
    }
}

/// Database model for package
#[derive(Debug, Clone, FromRow)]
#[allow(dead_code)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub procurement_type: ProcurementType,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub budget: i64,
    pub hps: i64,
    pub realization: i64,
    pub status: PackageStatus,
    pub provider_name: String,
    pub provider_address: String,
    pub opd_name: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    pub fn progress(&self) -> i32 {
        compute_progress(self.budget, self.realization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_from_amounts() {
        assert_eq!(compute_progress(100, 50), 50);
        assert_eq!(compute_progress(0, 12_345), 0);
        assert_eq!(compute_progress(-10, 5), 0);
        assert_eq!(compute_progress(37_000_000, 37_000_000), 100);
        assert_eq!(compute_progress(68_760_000, 15_312_385), 22);
        assert_eq!(compute_progress(200, 1), 1); // 0.5 rounds up
    }

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates { lat: -8.58, lon: 116.12 }.is_valid());
        assert!(!Coordinates { lat: 91.0, lon: 0.0 }.is_valid());
        assert!(!Coordinates { lat: 0.0, lon: f64::NAN }.is_valid());
    }

    #[test]
    fn test_labels() {
        assert_eq!(PackageStatus::InProgress.label(), "Dalam Proses");
        assert_eq!(ProcurementType::NonTender.label(), "Non-Tender");
        assert_eq!(PackageStatus::AtRisk.to_string(), "at_risk");
    }

    #[test]
    fn test_parse_code_or_label() {
        assert_eq!("non_tender".parse::<ProcurementType>(), Ok(ProcurementType::NonTender));
        assert_eq!("Non-Tender".parse::<ProcurementType>(), Ok(ProcurementType::NonTender));
        assert_eq!(" selesai ".parse::<PackageStatus>(), Ok(PackageStatus::Completed));
        assert_eq!("IN_PROGRESS".parse::<PackageStatus>(), Ok(PackageStatus::InProgress));
        assert!("Semua Jenis".parse::<ProcurementType>().is_err());
    }
}
