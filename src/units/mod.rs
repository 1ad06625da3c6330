// Module declarations
pub(crate) mod units_errors;
pub(crate) mod units_model;
pub(crate) mod units_repository;
pub(crate) mod units_service;

// Re-export the public interface
pub use units_model::{
    NewUnit, SolarOrientation, Unit, UnitDB, UnitStatus, UnitType, UnitUpdate,
};
pub use units_repository::UnitRepository;
pub use units_service::UnitService;

// Re-export error types for convenience
pub use units_errors::{Result, UnitError};
