mod progress_report;

pub use progress_report::ProgressReport;
