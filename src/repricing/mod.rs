mod repricing_model;
mod repricing_service;

pub use repricing_model::*;
pub use repricing_service::RepricingService;
