pub mod reference_dto;

pub use reference_dto::{CreateReferenceDto, ReferenceResponseDto};
