// Module declarations
pub(crate) mod adjustments_errors;
pub(crate) mod adjustments_model;
pub(crate) mod adjustments_repository;
pub(crate) mod adjustments_service;

// Re-export the public interface
pub use adjustments_model::{
    AdjustmentHistoryEntry, AdjustmentHistoryEntryDB, AdjustmentOutcome, NewAdjustment,
};
pub use adjustments_repository::AdjustmentRepository;
pub use adjustments_service::AdjustmentService;

// Re-export error types for convenience
pub use adjustments_errors::{AdjustmentError, Result};
