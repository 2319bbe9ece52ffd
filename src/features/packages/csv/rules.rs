use lazy_static::lazy_static;
use regex::Regex;

use crate::features::packages::models::{PackageStatus, ProcurementType};

lazy_static! {
    /// Currency marker, trailing cents group, and thousands dots in amounts
    /// such as "Rp. 1.234.567,00"
    static ref CURRENCY_NOISE: Regex = Regex::new(r"Rp\.\s?|,\d{2}$|\.").unwrap();

    /// Leading decimal number, the way a lenient float parser reads it
    static ref LEADING_NUMBER: Regex =
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap();
}

/// Status terms, checked in order; the first group with a hit wins
const STATUS_RULES: &[(PackageStatus, &[&str])] = &[
    (PackageStatus::Completed, &["selesai"]),
    (
        PackageStatus::InProgress,
        &["berjalan", "proses", "penandatanganan"],
    ),
    (
        PackageStatus::Suspended,
        &["ditunda", "dibatalkan", "ditutup"],
    ),
];

const TENDER_TERMS: &[&str] = &["tender", "konstruksi", "konsultansi", "barang", "lainnya"];

/// Parse a localized amount like "Rp. 1.234.567,00" into whole rupiah.
///
/// Blank input and input without a leading number yield 0. Only the
/// leading numeric part of what remains is read, so "12 juta" gives 12.
pub fn normalize_currency(text: &str) -> i64 {
    if text.trim().is_empty() {
        return 0;
    }

    let stripped = CURRENCY_NOISE.replace_all(text, "");
    let remainder = stripped.trim();

    LEADING_NUMBER
        .find(remainder)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .map(|n| n as i64)
        .unwrap_or(0)
}

/// Map a free-text stage ("Paket Sudah Selesai", "Tender Sedang
/// Berjalan", ...) onto a package status. Unmatched text is `Planning`.
pub fn normalize_status(text: &str) -> PackageStatus {
    let lower = text.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|(_, terms)| terms.iter().any(|t| lower.contains(t)))
        .map(|(status, _)| *status)
        .unwrap_or(PackageStatus::Planning)
}

/// Map a free-text procurement category ("Pekerjaan Konstruksi", "Jasa
/// Konsultansi Badan Usaha Non Konstruksi", ...) onto a procurement type.
pub fn normalize_type(text: &str) -> ProcurementType {
    let lower = text.to_lowercase();

    if lower.contains("swakelola") {
        return ProcurementType::Swakelola;
    }
    if lower.contains("non") && (lower.contains("tender") || lower.contains("konstruksi")) {
        return ProcurementType::NonTender;
    }
    if TENDER_TERMS.iter().any(|t| lower.contains(t)) {
        return ProcurementType::Tender;
    }
    ProcurementType::Tender
}
