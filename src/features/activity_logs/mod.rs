//! Admin activity log.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/logs` | List entries (paginated) |
//! | POST | `/api/admin/logs` | Write an entry |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::ActivityLogService;
