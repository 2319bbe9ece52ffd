mod progress_report_handler;

pub use progress_report_handler::*;
