use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::references::handlers;
use crate::features::references::services::ReferenceService;

/// Create public routes for the references feature
pub fn routes(service: Arc<ReferenceService>) -> Router {
    Router::new()
        .route("/api/opd", get(handlers::list_opd))
        .route("/api/providers", get(handlers::list_providers))
        .route("/api/selection-methods", get(handlers::list_selection_methods))
        .with_state(service)
}

/// Create admin routes, relative to the `/api/admin` prefix
pub fn admin_routes(service: Arc<ReferenceService>) -> Router {
    Router::new()
        .route("/opd", post(handlers::create_opd))
        .route("/providers", post(handlers::create_provider))
        .route("/selection-methods", post(handlers::create_selection_method))
        .with_state(service)
}
