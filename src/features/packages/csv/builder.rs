use rand::Rng;

use crate::features::packages::csv::coordinates::generate_fallback_coordinates;
use crate::features::packages::csv::format::{ColumnMap, HpsSource, TypeSource};
use crate::features::packages::csv::rules::{normalize_currency, normalize_status, normalize_type};
use crate::features::packages::csv::tokenizer::CsvRow;
use crate::features::packages::models::{NewPackage, ProcurementType};
use crate::shared::constants::{DEFAULT_PROVINCE, PLACEHOLDER_IMAGES};

/// Name given to rows without one; such rows are dropped
pub const PLACEHOLDER_NAME: &str = "Tanpa Nama";

/// OPD given to rows without a work unit
pub const UNKNOWN_OPD: &str = "OPD Tidak Diketahui";

/// Placeholder image for the `index`-th package of a batch
pub fn placeholder_image(index: usize) -> &'static str {
    PLACEHOLDER_IMAGES[index % PLACEHOLDER_IMAGES.len()]
}

/// Turn one CSV row into a package candidate using `columns`.
///
/// Missing or malformed fields get defaults. Returns `None` when the row
/// has no usable name. `index` picks the placeholder image.
pub fn build_package<R: Rng + ?Sized>(
    row: &CsvRow,
    columns: &ColumnMap,
    rng: &mut R,
    index: usize,
) -> Option<NewPackage> {
    let name = row.first_of(columns.name).unwrap_or(PLACEHOLDER_NAME);
    if name == PLACEHOLDER_NAME {
        return None;
    }

    let budget = normalize_currency(row.first_of(columns.budget).unwrap_or("0"));
    let realization = normalize_currency(row.first_of(columns.realization).unwrap_or("0"));
    let hps = match columns.hps {
        HpsSource::Column(headers) => normalize_currency(row.first_of(headers).unwrap_or("0")),
        HpsSource::Budget => budget,
    };

    let procurement_type = match columns.procurement_type {
        TypeSource::Column(headers) => row
            .first_of(headers)
            .map(normalize_type)
            .unwrap_or(ProcurementType::Tender),
        TypeSource::Fixed(t) => t,
    };

    let status = normalize_status(row.first_of(columns.status).unwrap_or_default());

    Some(NewPackage {
        name: name.to_string(),
        procurement_type,
        location: row
            .first_of(columns.location)
            .unwrap_or(DEFAULT_PROVINCE)
            .to_string(),
        coordinates: generate_fallback_coordinates(rng),
        budget,
        hps,
        realization,
        status,
        provider_name: row
            .first_of(columns.provider_name)
            .unwrap_or(columns.provider_name_default)
            .to_string(),
        provider_address: row
            .first_of(columns.provider_address)
            .unwrap_or(DEFAULT_PROVINCE)
            .to_string(),
        opd_name: row
            .first_of(columns.opd_name)
            .unwrap_or(UNKNOWN_OPD)
            .to_string(),
        image_url: Some(placeholder_image(index).to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::packages::csv::format::{SWAKELOLA_COLUMNS, TENDER_COLUMNS};
    use crate::features::packages::models::PackageStatus;
    use fake::faker::company::en::CompanyName;
    use fake::Fake;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tender_row(name: &str) -> CsvRow {
        [
            ("Nama Paket", name),
            ("KLPD", "Provinsi Nusa Tenggara Barat"),
            ("Nama Satker", "Dinas Perhubungan"),
            ("Jenis Pengadaan", "Pekerjaan Konstruksi"),
            ("Nilai Pagu", "Rp. 3.363.011.000,00"),
            ("Nilai HPS", "Rp. 3.300.000.000,00"),
            ("Nama Pemenang", "CV. RIDHO GRAHA"),
            ("Nilai Kontrak", "2924397000"),
            ("Tahap", "Tender Sudah Selesai"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_tender_row_maps_every_field() {
        let mut rng = StdRng::seed_from_u64(1);
        let pkg = build_package(&tender_row("Rehabilitasi D.I. Santong"), &TENDER_COLUMNS, &mut rng, 0)
            .unwrap();

        assert_eq!(pkg.name, "Rehabilitasi D.I. Santong");
        assert_eq!(pkg.procurement_type, ProcurementType::Tender);
        assert_eq!(pkg.location, "Provinsi Nusa Tenggara Barat");
        assert_eq!(pkg.budget, 3_363_011_000);
        assert_eq!(pkg.hps, 3_300_000_000);
        assert_eq!(pkg.realization, 2_924_397_000);
        assert_eq!(pkg.status, PackageStatus::Completed);
        assert_eq!(pkg.provider_name, "CV. RIDHO GRAHA");
        assert_eq!(pkg.provider_address, "Provinsi Nusa Tenggara Barat");
        assert_eq!(pkg.opd_name, "Dinas Perhubungan");
        assert_eq!(pkg.image_url.as_deref(), Some(PLACEHOLDER_IMAGES[0]));
        assert!(pkg.coordinates.is_valid());
        assert_eq!(pkg.progress(), 87);
    }

    #[test]
    fn test_swakelola_defaults() {
        let row: CsvRow = [
            ("Nama Paket", "Belanja Jasa Kalibrasi"),
            ("Nilai Pagu", "Rp. 25.950.000,00"),
            ("Nilai Total Realiasai", ""),
            ("Nama Pelaksana", ""),
            ("Tipe Swakelola", "K/L/PD Penanggung Jawab Anggaran"),
        ]
        .into_iter()
        .collect();

        let mut rng = StdRng::seed_from_u64(2);
        let pkg = build_package(&row, &SWAKELOLA_COLUMNS, &mut rng, 6).unwrap();

        assert_eq!(pkg.procurement_type, ProcurementType::Swakelola);
        assert_eq!(pkg.hps, pkg.budget);
        assert_eq!(pkg.realization, 0);
        assert_eq!(pkg.status, PackageStatus::Planning);
        assert_eq!(pkg.location, DEFAULT_PROVINCE);
        assert_eq!(pkg.provider_name, "Swakelola Internal");
        assert_eq!(pkg.provider_address, DEFAULT_PROVINCE);
        assert_eq!(pkg.opd_name, UNKNOWN_OPD);
        assert_eq!(pkg.image_url.as_deref(), Some(PLACEHOLDER_IMAGES[1]));
        assert_eq!(pkg.progress(), 0);
    }

    #[test]
    fn test_location_falls_back_to_alternate_header() {
        let row: CsvRow = [("Nama Paket", "Paket"), ("KLPD", ""), ("K/L/PD", "Kota Mataram")]
            .into_iter()
            .collect();
        let mut rng = StdRng::seed_from_u64(3);
        let pkg = build_package(&row, &TENDER_COLUMNS, &mut rng, 0).unwrap();
        assert_eq!(pkg.location, "Kota Mataram");
        assert_eq!(pkg.provider_name, "Belum Ada Pemenang");
    }

    #[test]
    fn test_unnamed_rows_are_dropped() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(build_package(&tender_row(""), &TENDER_COLUMNS, &mut rng, 0).is_none());
        assert!(build_package(&tender_row(PLACEHOLDER_NAME), &TENDER_COLUMNS, &mut rng, 0).is_none());
    }

    #[test]
    fn test_arbitrary_names_are_kept() {
        let mut rng = StdRng::seed_from_u64(5);
        for i in 0..20 {
            let name: String = CompanyName().fake();
            let pkg = build_package(&tender_row(&name), &TENDER_COLUMNS, &mut rng, i).unwrap();
            assert_eq!(pkg.name, name);
        }
    }

    #[test]
    fn test_placeholder_image_rotates() {
        assert_eq!(placeholder_image(0), placeholder_image(PLACEHOLDER_IMAGES.len()));
        assert_ne!(placeholder_image(0), placeholder_image(1));
    }
}
