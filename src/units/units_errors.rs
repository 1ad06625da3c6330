use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for unit-related operations
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),
}

impl From<DieselError> for UnitError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => UnitError::NotFound("Record not found".to_string()),
            _ => UnitError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for unit operations
pub type Result<T> = std::result::Result<T, UnitError>;
