use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for a progress report, joined with its package name
#[derive(Debug, Clone, FromRow)]
pub struct ProgressReport {
    pub id: i64,
    pub package_id: i64,
    pub package_name: Option<String>,
    pub percentage: i32,
    pub reported_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
