// Module declarations
pub(crate) mod pricing_errors;
pub(crate) mod pricing_model;
pub(crate) mod pricing_repository;
pub(crate) mod pricing_service;

// Re-export the public interface
pub use pricing_model::{
    FloorValorization, NewPricingParameterSet, PricingParameterSet, PricingParameterSetDB,
    PricingParameterSetUpdate,
};
pub use pricing_repository::PricingRepository;
pub use pricing_service::PricingService;

// Re-export error types for convenience
pub use pricing_errors::{PricingError, Result};
