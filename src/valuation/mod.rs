mod valuation_errors;
pub mod valuation_calculator;

#[cfg(test)]
mod valuation_calculator_tests;

pub use valuation_calculator::*;
pub use valuation_errors::ValuationError;
