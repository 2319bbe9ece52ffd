use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::activity_logs::{dtos as logs_dtos, handlers as logs_handlers};
use crate::features::packages::{
    csv as packages_csv, dtos as packages_dtos, handlers as packages_handlers,
    models as packages_models,
};
use crate::features::progress_reports::{
    dtos as progress_dtos, handlers as progress_handlers,
};
use crate::features::references::{dtos as references_dtos, handlers as references_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Packages (public)
        packages_handlers::list_packages,
        packages_handlers::get_package,
        packages_handlers::package_stats,
        packages_handlers::map_markers,
        packages_handlers::featured_packages,
        packages_handlers::opd_options,
        // Packages (admin)
        packages_handlers::create_package,
        packages_handlers::update_package,
        packages_handlers::delete_package,
        packages_handlers::import_packages,
        packages_handlers::preview_import,
        // References
        references_handlers::list_opd,
        references_handlers::create_opd,
        references_handlers::list_providers,
        references_handlers::create_provider,
        references_handlers::list_selection_methods,
        references_handlers::create_selection_method,
        // Progress reports
        progress_handlers::list_progress_reports,
        progress_handlers::create_progress_report,
        // Activity logs (admin)
        logs_handlers::list_logs,
        logs_handlers::create_log,
    ),
    components(
        schemas(
            Meta,
            // Packages
            packages_models::ProcurementType,
            packages_models::PackageStatus,
            packages_models::Coordinates,
            packages_models::NewPackage,
            packages_csv::SourceFormat,
            packages_dtos::PackageResponseDto,
            packages_dtos::CoordinatesDto,
            packages_dtos::PackageInputDto,
            packages_dtos::MapMarkerDto,
            packages_dtos::PackageStatsDto,
            packages_dtos::StatsSummaryDto,
            packages_dtos::StatusCountDto,
            packages_dtos::TypeCountDto,
            packages_dtos::UploadCsvDto,
            packages_dtos::ImportResultDto,
            packages_dtos::ImportPreviewDto,
            packages_dtos::ImportCandidateDto,
            ApiResponse<packages_dtos::PackageResponseDto>,
            ApiResponse<Vec<packages_dtos::PackageResponseDto>>,
            ApiResponse<Vec<packages_dtos::MapMarkerDto>>,
            ApiResponse<packages_dtos::PackageStatsDto>,
            ApiResponse<packages_dtos::ImportResultDto>,
            ApiResponse<packages_dtos::ImportPreviewDto>,
            ApiResponse<Vec<String>>,
            // References
            references_dtos::ReferenceResponseDto,
            references_dtos::CreateReferenceDto,
            ApiResponse<references_dtos::ReferenceResponseDto>,
            ApiResponse<Vec<references_dtos::ReferenceResponseDto>>,
            // Progress reports
            progress_dtos::ProgressReportResponseDto,
            progress_dtos::CreateProgressReportDto,
            ApiResponse<progress_dtos::ProgressReportResponseDto>,
            ApiResponse<Vec<progress_dtos::ProgressReportResponseDto>>,
            // Activity logs
            logs_dtos::ActivityLogResponseDto,
            logs_dtos::CreateActivityLogDto,
            ApiResponse<logs_dtos::ActivityLogResponseDto>,
            ApiResponse<Vec<logs_dtos::ActivityLogResponseDto>>,
        )
    ),
    tags(
        (name = "packages", description = "Procurement packages dashboard (public)"),
        (name = "references", description = "OPD, providers and selection methods (public)"),
        (name = "progress-reports", description = "Field progress reports (public)"),
        (name = "admin", description = "Admin endpoints (basic auth when configured)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Monitoring Pengadaan NTB API",
        version = "0.1.0",
        description = "API documentation for the NTB procurement monitoring dashboard",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP Basic security scheme used by the admin routes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
