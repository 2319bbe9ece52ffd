mod import_service;
mod package_service;

pub use import_service::ImportService;
pub use package_service::PackageService;
