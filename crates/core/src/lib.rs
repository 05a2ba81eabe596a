//! Lâmina Core - Portfolio configuration and the performance report pipeline.
//!
//! This crate turns daily closes into the lâmina: a weighted portfolio value
//! series compared against its benchmark, a consolidated returns table and
//! a risk indicators table. Prices come from any
//! [`lamina_market_data::MarketDataProvider`].

pub mod constants;
pub mod errors;
pub mod portfolios;
pub mod report;

pub use portfolios::{PortfolioDefinition, PortfolioKind};
pub use report::{Report, ReportOptions, ReportSelection, ReportService, ReportServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
