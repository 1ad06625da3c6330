use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for development-related operations
#[derive(Debug, Error)]
pub enum DevelopmentError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Development still has units: {0}")]
    HasUnits(String),
}

impl From<DieselError> for DevelopmentError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => DevelopmentError::NotFound("Record not found".to_string()),
            _ => DevelopmentError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for development operations
pub type Result<T> = std::result::Result<T, DevelopmentError>;
