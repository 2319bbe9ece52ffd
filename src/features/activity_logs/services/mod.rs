mod activity_log_service;

pub use activity_log_service::ActivityLogService;
