//! Report service traits.

use async_trait::async_trait;

use super::report_model::{Report, ReportOptions, ReportSelection};
use crate::errors::Result;
use crate::portfolios::PortfolioDefinition;

/// Trait defining the contract for report generation.
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    /// Fetches prices for the selection and derives the full report.
    ///
    /// Either every table is produced or a single error is returned.
    async fn generate_report(&self, selection: &ReportSelection) -> Result<Report>;

    /// Options the service was configured with.
    fn options(&self) -> &ReportOptions;

    /// Configured portfolios, in display order.
    fn portfolios(&self) -> Vec<PortfolioDefinition>;
}
