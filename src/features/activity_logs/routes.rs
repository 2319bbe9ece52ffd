use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::activity_logs::handlers;
use crate::features::activity_logs::services::ActivityLogService;

/// Create admin routes, relative to the `/api/admin` prefix
pub fn admin_routes(service: Arc<ActivityLogService>) -> Router {
    Router::new()
        .route("/logs", get(handlers::list_logs).post(handlers::create_log))
        .with_state(service)
}
