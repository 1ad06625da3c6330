use thiserror::Error;

/// Error type for the valuation engine. Missing optional inputs are never
/// errors; only structural preconditions are.
#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),
    #[error("Invalid pricing parameters: {0}")]
    InvalidParameters(String),
}
