use rand::Rng;

use crate::features::packages::models::Coordinates;

/// Rectangle in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Box around the Nusa Tenggara Barat province (Lombok and Sumbawa)
pub const NTB_BOUNDS: BoundingBox = BoundingBox {
    min_lat: -9.0,
    max_lat: -8.1,
    min_lon: 115.7,
    max_lon: 119.2,
};

/// Point used whenever a generated point is unusable (Mataram)
pub const SAFE_DEFAULT_POINT: Coordinates = Coordinates {
    lat: -8.58,
    lon: 116.12,
};

/// Uniform random point inside `bounds`, rounded to 4 decimals.
///
/// The result is checked before it is returned and replaced with
/// [`SAFE_DEFAULT_POINT`] when it is not a usable WGS84 point.
pub fn fallback_coordinates<R: Rng + ?Sized>(rng: &mut R, bounds: &BoundingBox) -> Coordinates {
    let lat = rng.gen::<f64>() * (bounds.max_lat - bounds.min_lat) + bounds.min_lat;
    let lon = rng.gen::<f64>() * (bounds.max_lon - bounds.min_lon) + bounds.min_lon;

    let point = Coordinates {
        lat: round4(lat),
        lon: round4(lon),
    };

    if point.is_valid() {
        point
    } else {
        SAFE_DEFAULT_POINT
    }
}

/// [`fallback_coordinates`] within [`NTB_BOUNDS`]
pub fn generate_fallback_coordinates<R: Rng + ?Sized>(rng: &mut R) -> Coordinates {
    fallback_coordinates(rng, &NTB_BOUNDS)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
