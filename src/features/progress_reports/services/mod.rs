mod progress_report_service;

pub use progress_report_service::ProgressReportService;
