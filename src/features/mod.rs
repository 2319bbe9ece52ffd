pub mod activity_logs;
pub mod packages;
pub mod progress_reports;
pub mod references;
