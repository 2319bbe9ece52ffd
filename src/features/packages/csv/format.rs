use serde::Serialize;
use utoipa::ToSchema;

use crate::features::packages::models::ProcurementType;

/// Header shapes the importer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// Tender / non-tender export (SPSE)
    Tender,
    /// Self-managed works export
    Swakelola,
    Unknown,
}

impl SourceFormat {
    /// Column table for this shape; `None` for [`SourceFormat::Unknown`]
    pub fn columns(&self) -> Option<&'static ColumnMap> {
        match self {
            SourceFormat::Tender => Some(&TENDER_COLUMNS),
            SourceFormat::Swakelola => Some(&SWAKELOLA_COLUMNS),
            SourceFormat::Unknown => None,
        }
    }
}

/// Where a package's procurement type comes from
#[derive(Debug, Clone, Copy)]
pub enum TypeSource {
    /// Free-text category columns, normalized
    Column(&'static [&'static str]),
    /// Every row of the shape has the same type
    Fixed(ProcurementType),
}

/// Where a package's HPS comes from
#[derive(Debug, Clone, Copy)]
pub enum HpsSource {
    Column(&'static [&'static str]),
    /// Shape has no HPS column; the budget stands in
    Budget,
}

/// Column names feeding each package field.
///
/// Each list is a fallback chain: the first present, non-empty column wins.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    pub name: &'static [&'static str],
    pub procurement_type: TypeSource,
    pub location: &'static [&'static str],
    pub budget: &'static [&'static str],
    pub hps: HpsSource,
    pub realization: &'static [&'static str],
    pub status: &'static [&'static str],
    pub provider_name: &'static [&'static str],
    pub provider_name_default: &'static str,
    pub provider_address: &'static [&'static str],
    pub opd_name: &'static [&'static str],
}

pub const TENDER_COLUMNS: ColumnMap = ColumnMap {
    name: &["Nama Paket"],
    procurement_type: TypeSource::Column(&["Jenis Pengadaan"]),
    location: &["KLPD", "K/L/PD"],
    budget: &["Nilai Pagu"],
    hps: HpsSource::Column(&["Nilai HPS"]),
    realization: &["Nilai Kontrak"],
    status: &["Tahap", "Status Paket"],
    provider_name: &["Nama Pemenang"],
    provider_name_default: "Belum Ada Pemenang",
    provider_address: &["KLPD", "K/L/PD"],
    opd_name: &["Nama Satker"],
};

pub const SWAKELOLA_COLUMNS: ColumnMap = ColumnMap {
    name: &["Nama Paket"],
    procurement_type: TypeSource::Fixed(ProcurementType::Swakelola),
    location: &["K/L/PD", "KLPD"],
    budget: &["Nilai Pagu"],
    hps: HpsSource::Budget,
    // header spelling as exported by the source system
    realization: &["Nilai Total Realiasai"],
    status: &["Status Paket"],
    provider_name: &["Nama Pelaksana"],
    provider_name_default: "Swakelola Internal",
    provider_address: &["Nama Satker"],
    opd_name: &["Nama Satker"],
};

/// Identify the export shape from its header names.
///
/// The tender shape is checked first.
pub fn detect_format<S: AsRef<str>>(headers: &[S]) -> SourceFormat {
    let has = |name: &str| headers.iter().any(|h| h.as_ref() == name);

    if has("Nilai Kontrak") && has("Jenis Pengadaan") {
        SourceFormat::Tender
    } else if has("Nilai Total Realiasai") && has("Tipe Swakelola") {
        SourceFormat::Swakelola
    } else {
        SourceFormat::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_tender() {
        let headers = ["Nama Paket", "Jenis Pengadaan", "Nilai Pagu", "Nilai Kontrak"];
        assert_eq!(detect_format(&headers), SourceFormat::Tender);
    }

    #[test]
    fn test_detect_swakelola() {
        let headers = vec![
            "Nama Paket".to_string(),
            "Tipe Swakelola".to_string(),
            "Nilai Total Realiasai".to_string(),
        ];
        assert_eq!(detect_format(&headers), SourceFormat::Swakelola);
    }

    #[test]
    fn test_detect_requires_both_columns() {
        assert_eq!(
            detect_format(&["Nama Paket", "Nilai Kontrak"]),
            SourceFormat::Unknown
        );
        assert_eq!(
            detect_format(&["Tipe Swakelola", "Nilai Pagu"]),
            SourceFormat::Unknown
        );
        assert_eq!(detect_format::<&str>(&[]), SourceFormat::Unknown);
    }

    #[test]
    fn test_tender_checked_first() {
        let headers = [
            "Nilai Kontrak",
            "Jenis Pengadaan",
            "Nilai Total Realiasai",
            "Tipe Swakelola",
        ];
        assert_eq!(detect_format(&headers), SourceFormat::Tender);
    }

    #[test]
    fn test_unknown_has_no_columns() {
        assert!(SourceFormat::Unknown.columns().is_none());
        assert!(SourceFormat::Tender.columns().is_some());
    }
}
