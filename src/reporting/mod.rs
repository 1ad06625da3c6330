mod reporting_model;
mod reporting_service;

pub use reporting_model::*;
pub use reporting_service::ReportingService;
