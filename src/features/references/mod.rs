//! Reference tables: OPD, providers and selection methods.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/opd` | List OPD |
//! | GET | `/api/providers` | List providers |
//! | GET | `/api/selection-methods` | List selection methods |
//! | POST | `/api/admin/opd` | Add OPD |
//! | POST | `/api/admin/providers` | Add provider |
//! | POST | `/api/admin/selection-methods` | Add selection method |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ReferenceService;
