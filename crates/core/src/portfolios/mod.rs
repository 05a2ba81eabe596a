//! Portfolio configuration.
//!
//! The two report portfolios and their benchmarks are static configuration,
//! defined at compile time and never edited at runtime.

mod portfolios_constants;
mod portfolios_model;

pub use portfolios_constants::*;
pub use portfolios_model::*;

#[cfg(test)]
mod portfolios_model_tests;
