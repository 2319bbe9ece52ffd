//! Field progress reports recorded against packages.
//!
//! Reported percentages are kept as a history next to the package; the
//! package's own progress is always derived from its amounts.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/progress-reports` | List reports (optionally by `package_id`) |
//! | POST | `/api/admin/progress-reports` | Record a report |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ProgressReportService;
