use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::packages::csv::ImportError;
use crate::shared::types::ApiResponse;

/// Postgres SQLSTATE for unique_violation
const PG_UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for foreign_key_violation
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}

impl AppError {
    /// Classify a database error raised by a write.
    ///
    /// Unique violations become `Conflict(conflict_msg)`, foreign key
    /// violations become `NotFound(missing_msg)`, anything else stays a
    /// database error.
    pub fn from_write(e: sqlx::Error, conflict_msg: &str, missing_msg: &str) -> Self {
        let code = e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|c| c.into_owned());

        match code.as_deref() {
            Some(PG_UNIQUE_VIOLATION) => AppError::Conflict(conflict_msg.to_string()),
            Some(PG_FOREIGN_KEY_VIOLATION) => AppError::NotFound(missing_msg.to_string()),
            _ => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::Import(ref e) => {
                tracing::warn!("CSV import rejected: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string(), None)
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
