/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// DASHBOARD CONSTANTS
// =============================================================================

/// Province every package belongs to; used when a package has no location
pub const DEFAULT_PROVINCE: &str = "Nusa Tenggara Barat";

/// Filter value meaning "no OPD filter" (listed first in the OPD options)
pub const ALL_OPD_OPTION: &str = "Semua OPD";

/// Filter value meaning "no procurement type filter"
pub const ALL_TYPES_OPTION: &str = "Semua Jenis";

/// Filter value meaning "no status filter"
pub const ALL_STATUS_OPTION: &str = "Semua Status";

/// Generic images rotated across packages that come without one
pub const PLACEHOLDER_IMAGES: [&str; 5] = [
    "https://i.imgur.com/8m5g2a5.jpeg",
    "https://i.imgur.com/xQfV8GZ.jpeg",
    "https://i.imgur.com/pDRgq8s.jpeg",
    "https://i.imgur.com/s6XbK3g.jpeg",
    "https://i.imgur.com/so72y52.jpeg",
];
