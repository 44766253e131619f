//! Domain error types
//!
//! These errors represent business-level failures. Store errors are classified
//! on conversion so callers can tell a missing row from a broken constraint.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Referenced entity id does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    /// Uniqueness or foreign-key constraint rejected the write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    /// Missing required field or malformed value
    #[error("Validation error: {0}")]
    Validation(String),
    /// A unit of work could not be started, committed or rolled back
    #[error("Transaction failure: {0}")]
    TransactionFailure(String),
    /// Any other store error
    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::ConstraintViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                DomainError::ConstraintViolation(msg)
            }
            _ => DomainError::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DomainError::not_found("Student", 42);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Student 42 not found");
    }

    #[test]
    fn test_plain_db_error_maps_to_database() {
        let err: DomainError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, DomainError::Database(msg) if msg.contains("boom")));
    }
}
