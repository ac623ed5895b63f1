use sea_orm::{DbErr, SqlErr};
use std::fmt;
use thiserror::Error;

/// Errors surfaced by the query layer.
///
/// A lookup that finds nothing is not an error: single-row lookups return
/// `None` and collection lookups return an empty `Vec`. `NotFound` exists
/// for callers that require presence (see [`OptionExt::found`]).
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        message: String,
        #[source]
        source: DbErr,
    },

    #[error("Storage error: {0}")]
    Storage(#[source] DbErr),
}

impl From<DbErr> for QueryError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(
                SqlErr::UniqueConstraintViolation(message)
                | SqlErr::ForeignKeyConstraintViolation(message),
            ) => Self::ConstraintViolation {
                message,
                source: err,
            },
            _ => Self::Storage(err),
        }
    }
}

impl QueryError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// The underlying storage error, untouched.
    #[must_use]
    pub const fn db_err(&self) -> Option<&DbErr> {
        match self {
            Self::NotFound { .. } => None,
            Self::ConstraintViolation { source, .. } => Some(source),
            Self::Storage(err) => Some(err),
        }
    }
}

pub trait OptionExt<T> {
    /// Turns an absent row into [`QueryError::NotFound`].
    fn found(self, entity: &'static str, id: impl fmt::Display) -> Result<T, QueryError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn found(self, entity: &'static str, id: impl fmt::Display) -> Result<T, QueryError> {
        self.ok_or_else(|| QueryError::not_found(entity, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_keeps_source() {
        let err = QueryError::from(DbErr::Custom("connection reset".to_string()));
        assert!(matches!(err, QueryError::Storage(_)));
        let source = err.db_err().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains("connection reset"));
        assert!(err.to_string().starts_with("Storage error:"));
    }

    #[test]
    fn test_found_on_absent_row() {
        let missing: Option<i32> = None;
        let err = missing.found("Fine", 42).unwrap_err();
        assert_eq!(err.to_string(), "Fine 42 not found");
        assert!(err.db_err().is_none());
    }

    #[test]
    fn test_found_on_present_row() {
        assert_eq!(Some(7).found("Fine", 7).unwrap(), 7);
    }
}
