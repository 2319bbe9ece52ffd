use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for an admin activity log entry
#[derive(Debug, Clone, FromRow)]
pub struct ActivityLog {
    pub id: i64,
    pub action: String,
    pub description: Option<String>,
    pub ip: Option<String>,
    pub created_at: DateTime<Utc>,
}
