use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for manual-adjustment operations
#[derive(Debug, Error)]
pub enum AdjustmentError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("No active parameter set: {0}")]
    NoActiveParameter(String),
}

impl From<DieselError> for AdjustmentError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => AdjustmentError::NotFound("Record not found".to_string()),
            _ => AdjustmentError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for adjustment operations
pub type Result<T> = std::result::Result<T, AdjustmentError>;
