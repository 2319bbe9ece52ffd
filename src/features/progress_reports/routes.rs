use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::progress_reports::handlers;
use crate::features::progress_reports::services::ProgressReportService;

/// Create public routes for the progress reports feature
pub fn routes(service: Arc<ProgressReportService>) -> Router {
    Router::new()
        .route("/api/progress-reports", get(handlers::list_progress_reports))
        .with_state(service)
}

/// Create admin routes, relative to the `/api/admin` prefix
pub fn admin_routes(service: Arc<ProgressReportService>) -> Router {
    Router::new()
        .route("/progress-reports", post(handlers::create_progress_report))
        .with_state(service)
}
