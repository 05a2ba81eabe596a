//! Lâmina report pipeline.
//!
//! Prices flow through four stages: normalization into a dense table,
//! weighted aggregation into value series, the consolidated returns table
//! and the indicators table. Each stage is a pure function; the service
//! only adds fetching on top.

pub mod aggregation;
pub mod consolidation;
pub mod indicators;
mod price_table;
mod report_model;
mod report_service;
mod report_traits;

pub use price_table::PriceTable;
pub use report_model::*;
pub use report_service::{build_report, ReportService};
pub use report_traits::ReportServiceTrait;
