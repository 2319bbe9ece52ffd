use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::features::packages::handlers;
use crate::features::packages::services::{ImportService, PackageService};

/// Multipart overhead allowed on top of the CSV size limit
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create public routes for the packages feature
///
/// Note: These routes are public (no authentication required)
pub fn routes(service: Arc<PackageService>) -> Router {
    Router::new()
        .route("/api/packages", get(handlers::list_packages))
        .route("/api/packages/stats", get(handlers::package_stats))
        .route("/api/packages/map", get(handlers::map_markers))
        .route("/api/packages/featured", get(handlers::featured_packages))
        .route("/api/packages/opd-options", get(handlers::opd_options))
        .route("/api/packages/{id}", get(handlers::get_package))
        .with_state(service)
}

/// Create admin routes, relative to the `/api/admin` prefix
pub fn admin_routes(
    package_service: Arc<PackageService>,
    import_service: Arc<ImportService>,
    max_file_size: usize,
) -> Router {
    let upload_limit = DefaultBodyLimit::max(max_file_size + MULTIPART_OVERHEAD);

    let crud = Router::new()
        .route("/packages", post(handlers::create_package))
        .route(
            "/packages/{id}",
            put(handlers::update_package).delete(handlers::delete_package),
        )
        .with_state(package_service);

    let import = Router::new()
        .route(
            "/packages/import",
            post(handlers::import_packages).layer(upload_limit.clone()),
        )
        .route(
            "/packages/import/preview",
            post(handlers::preview_import).layer(upload_limit),
        )
        .with_state(import_service);

    crud.merge(import)
}
