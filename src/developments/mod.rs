// Module declarations
pub(crate) mod developments_errors;
pub(crate) mod developments_model;
pub(crate) mod developments_repository;
pub(crate) mod developments_service;

// Re-export the public interface
pub use developments_model::{Development, DevelopmentDB, DevelopmentUpdate, NewDevelopment};
pub use developments_repository::DevelopmentRepository;
pub use developments_service::DevelopmentService;

// Re-export error types for convenience
pub use developments_errors::{DevelopmentError, Result};
