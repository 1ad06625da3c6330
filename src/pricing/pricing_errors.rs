use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for pricing-parameter operations
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("No active parameter set: {0}")]
    NoActiveParameter(String),
    #[error("Activation failed: {0}")]
    ActivationFailed(String),
    #[error("Parameter set is active: {0}")]
    ActiveSetDeletion(String),
}

impl From<DieselError> for PricingError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => PricingError::NotFound("Record not found".to_string()),
            _ => PricingError::DatabaseError(err.to_string()),
        }
    }
}

/// Result type for pricing operations
pub type Result<T> = std::result::Result<T, PricingError>;
