pub mod progress_report_dto;

pub use progress_report_dto::{
    CreateProgressReportDto, ProgressReportQuery, ProgressReportResponseDto,
};
