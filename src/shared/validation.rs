use std::borrow::Cow;

use validator::ValidationError;

/// Reject strings that are empty after trimming.
///
/// The dashboard forms treat whitespace-only input as missing.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("Kolom wajib diisi"));
        return Err(err);
    }
    Ok(())
}

/// Latitude must be finite and within [-90, 90]
pub fn validate_latitude(value: f64) -> Result<(), ValidationError> {
    validate_degrees(value, 90.0, "Latitude harus berada di antara -90 dan 90")
}

/// Longitude must be finite and within [-180, 180]
pub fn validate_longitude(value: f64) -> Result<(), ValidationError> {
    validate_degrees(value, 180.0, "Longitude harus berada di antara -180 dan 180")
}

fn validate_degrees(value: f64, bound: f64, message: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        return Ok(());
    }
    let mut err = ValidationError::new("coordinate_range");
    err.message = Some(Cow::Borrowed(message));
    Err(err)
}
