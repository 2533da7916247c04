use thiserror::Error;

use crate::value::FieldType;

/// Errors surfaced by the mapper and its connection collaborator.
///
/// Every failure reaches the immediate caller of `write`/`read`; nothing is
/// retried or recovered locally.
#[derive(Debug, Error)]
pub enum OrmError {
    /// The record type cannot be mapped (no primary key, or more than one).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A field's semantic type has no coercion rule.
    #[error("unsupported type {field_type:?} for field `{field}`")]
    UnsupportedType {
        field: &'static str,
        field_type: FieldType,
    },

    /// The connection collaborator failed while running a statement.
    #[error("persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A read matched no row.
    #[error("no row in `{table}` with primary key {key}")]
    NotFound { table: &'static str, key: i64 },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("column `{0}` not present in result row")]
    ColumnNotFound(String),
}

impl OrmError {
    pub fn persistence(message: impl Into<String>) -> Self {
        OrmError::Persistence(message.into().into())
    }
}

impl From<rusqlite::Error> for OrmError {
    fn from(e: rusqlite::Error) -> Self {
        OrmError::Persistence(Box::new(e))
    }
}

impl<T> From<std::sync::PoisonError<T>> for OrmError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        OrmError::persistence(format!("connection lock poisoned: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, OrmError>;
