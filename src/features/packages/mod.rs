//! Procurement packages feature.
//!
//! Lists, filters, maps and summarizes the procurement packages of the
//! province, and lets the admin view maintain them by hand or from SPSE
//! CSV exports.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/packages` | List packages (filters + pagination) |
//! | GET | `/api/packages/{id}` | Get package by id |
//! | GET | `/api/packages/stats` | Summary and status/type breakdowns |
//! | GET | `/api/packages/map` | Map markers |
//! | GET | `/api/packages/featured` | Largest packages by budget |
//! | GET | `/api/packages/opd-options` | OPD filter options |
//! | POST | `/api/admin/packages` | Create package |
//! | PUT | `/api/admin/packages/{id}` | Replace package |
//! | DELETE | `/api/admin/packages/{id}` | Delete package |
//! | POST | `/api/admin/packages/import` | Import a CSV export |
//! | POST | `/api/admin/packages/import/preview` | Parse a CSV export without saving |

pub mod csv;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::{ImportService, PackageService};
