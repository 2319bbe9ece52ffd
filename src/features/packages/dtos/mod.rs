pub mod import_dto;
pub mod package_dto;
pub mod stats_dto;

pub use import_dto::{ImportCandidateDto, ImportPreviewDto, ImportResultDto, UploadCsvDto};
pub use package_dto::{
    CoordinatesDto, MapMarkerDto, PackageFilter, PackageFilterQuery, PackageInputDto,
    PackageResponseDto,
};
pub use stats_dto::{
    PackageStatsDto, PackageTotals, StatsSummaryDto, StatusCountDto, TypeCountDto,
};
