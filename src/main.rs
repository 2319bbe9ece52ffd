mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::activity_logs::{routes as activity_logs_routes, ActivityLogService};
use crate::features::packages::{routes as packages_routes, ImportService, PackageService};
use crate::features::progress_reports::{
    routes as progress_reports_routes, ProgressReportService,
};
use crate::features::references::{routes as references_routes, ReferenceService};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let app = build_app(pool, &config);

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Simple health check endpoint (no auth required)
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Wire services, routes and layers into the application router
fn build_app(pool: PgPool, config: &Config) -> Router {
    let package_service = Arc::new(PackageService::new(pool.clone()));
    let import_service = Arc::new(ImportService::new(
        Arc::clone(&package_service),
        config.import.clone(),
        config.database.max_connections,
    ));
    let reference_service = Arc::new(ReferenceService::new(pool.clone()));
    let progress_report_service = Arc::new(ProgressReportService::new(pool.clone()));
    let activity_log_service = Arc::new(ActivityLogService::new(pool));
    tracing::info!("Services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    // Build swagger router
    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(
                Arc::new(credentials),
                "Swagger UI",
            )))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Admin routes (basic auth when credentials are configured)
    let admin_routes = Router::new()
        .merge(packages_routes::admin_routes(
            Arc::clone(&package_service),
            import_service,
            config.import.max_file_size,
        ))
        .merge(references_routes::admin_routes(Arc::clone(&reference_service)))
        .merge(progress_reports_routes::admin_routes(Arc::clone(
            &progress_report_service,
        )))
        .merge(activity_logs_routes::admin_routes(activity_log_service));

    let admin_routes = if let Some(credentials) = config.admin.credentials() {
        tracing::info!("Admin basic auth enabled");
        admin_routes.route_layer(from_fn(middleware::basic_auth_middleware(
            Arc::new(credentials),
            "Admin",
        )))
    } else {
        tracing::warn!("Admin basic auth disabled (no credentials configured)");
        admin_routes
    };

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(packages_routes::routes(package_service))
        .merge(references_routes::routes(reference_service))
        .merge(progress_reports_routes::routes(progress_report_service));

    Router::new()
        .merge(swagger)
        .merge(public_routes)
        .nest("/api/admin", admin_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::multipart::{MultipartForm, Part};
    use base64::prelude::*;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::{test_config, test_config_with_admin, test_server};

    const TENDER_CSV: &str = "\"Nama Paket\",\"KLPD\",\"Nama Satker\",\"Jenis Pengadaan\",\"Nilai Pagu\",\"Nilai HPS\",\"Nama Pemenang\",\"Nilai Kontrak\",\"Tahap\"\n\
\"Rehabilitasi Jaringan Irigasi D.I. Santong\",\"Provinsi Nusa Tenggara Barat\",\"Dinas Pekerjaan Umum dan Penataan Ruang\",\"Pekerjaan Konstruksi\",\"Rp. 3.363.011.000,00\",\"Rp. 3.363.011.000,00\",\"CV. RIDHO GRAHA\",\"2924397000\",\"Tender Sudah Selesai\"\n\
\"\",\"Provinsi Nusa Tenggara Barat\",\"Dinas Perhubungan\",\"Pekerjaan Konstruksi\",\"Rp. 1.000,00\",\"\",\"\",\"0\",\"\"\n";

    fn csv_form(contents: &str) -> MultipartForm {
        MultipartForm::new().add_part(
            "file",
            Part::bytes(contents.as_bytes().to_vec())
                .file_name("paket.csv")
                .mime_type("text/csv"),
        )
    }

    fn basic_auth(credentials: &str) -> HeaderValue {
        let value = format!("Basic {}", BASE64_STANDARD.encode(credentials));
        HeaderValue::from_str(&value).unwrap()
    }

    fn package_body(name: &str, lat: f64) -> Value {
        json!({
            "name": name,
            "type": "tender",
            "location": "Mataram",
            "coordinates": { "lat": lat, "lon": 116.1 },
            "budget": 1000000,
            "hps": 900000,
            "realization": 500000,
            "status": "in_progress",
            "providerName": "CV. Maju",
            "providerAddress": "Mataram",
            "opdName": "Dinas Perhubungan"
        })
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server(&test_config());
        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let server = test_server(&test_config());
        let response = server.get("/api-docs/openapi.json").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let doc = response.json::<Value>();
        assert!(doc["paths"]["/api/packages/stats"].is_object());
    }

    #[tokio::test]
    async fn test_preview_detects_tender_export() {
        let server = test_server(&test_config());
        let response = server
            .post("/api/admin/packages/import/preview")
            .multipart(csv_form(TENDER_CSV))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["format"], json!("tender"));
        assert_eq!(body["data"]["rowsRead"], json!(2));
        assert_eq!(body["data"]["rowsSkipped"], json!(1));

        let packages = body["data"]["packages"].as_array().unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0]["status"], json!("completed"));
        assert_eq!(packages[0]["type"], json!("tender"));
        assert_eq!(packages[0]["progress"], json!(87));
    }

    #[tokio::test]
    async fn test_preview_rejects_unknown_format() {
        let server = test_server(&test_config());
        let response = server
            .post("/api/admin/packages/import/preview")
            .multipart(csv_form("kolom,lain\n1,2\n"))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert_eq!(
            body["message"],
            json!("Format CSV tidak dikenali. Pastikan file Anda adalah data Tender atau Swakelola yang valid.")
        );
    }

    #[tokio::test]
    async fn test_preview_rejects_empty_file() {
        let server = test_server(&test_config());
        let response = server
            .post("/api/admin/packages/import/preview")
            .multipart(csv_form(""))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            json!("File CSV kosong atau format tidak dikenali.")
        );
    }

    #[tokio::test]
    async fn test_preview_rejects_oversized_upload() {
        let mut config = test_config();
        config.import.max_file_size = 100;
        let server = test_server(&config);

        let response = server
            .post("/api/admin/packages/import/preview")
            .multipart(csv_form(TENDER_CSV))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            json!("Ukuran file melebihi batas 100 byte")
        );
    }

    #[tokio::test]
    async fn test_import_without_file_field() {
        let server = test_server(&test_config());
        let form = MultipartForm::new().add_text("catatan", "tanpa file");
        let response = server.post("/api/admin/packages/import").multipart(form).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["message"],
            json!("Silakan pilih file CSV terlebih dahulu.")
        );
    }

    #[tokio::test]
    async fn test_create_package_validation() {
        let server = test_server(&test_config());

        let response = server
            .post("/api/admin/packages")
            .json(&package_body("   ", -8.58))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

        let response = server
            .post("/api/admin/packages")
            .json(&package_body("Jalan Lingkar", 120.0))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_progress_report_percentage_range() {
        let server = test_server(&test_config());
        let response = server
            .post("/api/admin/progress-reports")
            .json(&json!({
                "packageId": 1,
                "percentage": 150,
                "reportedOn": "2025-03-01"
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_type_filter() {
        let server = test_server(&test_config());
        let response = server
            .get("/api/packages")
            .add_query_param("type", "lelang")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let server = test_server(&test_config_with_admin("admin", "rahasia"));

        let response = server
            .post("/api/admin/packages/import/preview")
            .multipart(csv_form(TENDER_CSV))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert!(response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .is_some());
        assert_eq!(response.json::<Value>()["success"], json!(false));

        let response = server
            .post("/api/admin/packages/import/preview")
            .add_header(header::AUTHORIZATION, basic_auth("admin:salah"))
            .multipart(csv_form(TENDER_CSV))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

        let response = server
            .post("/api/admin/packages/import/preview")
            .add_header(header::AUTHORIZATION, basic_auth("admin:rahasia"))
            .multipart(csv_form(TENDER_CSV))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_routes_ignore_admin_gate() {
        let server = test_server(&test_config_with_admin("admin", "rahasia"));
        let response = server.get("/api/packages").add_query_param("status", "x").await;
        // reaches the handler, which rejects the filter
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
