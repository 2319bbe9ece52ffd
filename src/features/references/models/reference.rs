use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Lookup tables maintained from the admin view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Opd,
    Provider,
    SelectionMethod,
}

impl ReferenceKind {
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::Opd => "opd",
            ReferenceKind::Provider => "providers",
            ReferenceKind::SelectionMethod => "selection_methods",
        }
    }

    /// Name used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            ReferenceKind::Opd => "OPD",
            ReferenceKind::Provider => "Penyedia",
            ReferenceKind::SelectionMethod => "Metode pemilihan",
        }
    }
}

/// Database model for a reference entry
#[derive(Debug, Clone, FromRow)]
pub struct Reference {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
