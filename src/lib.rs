pub mod db;

pub mod adjustments;
pub mod developments;
pub mod pricing;
pub mod units;

pub mod constants;
pub mod errors;
pub mod reporting;
pub mod repricing;
pub mod schema;
pub mod valuation;

pub use errors::{Error, Result};
pub use repricing::*;
pub use valuation::*;
