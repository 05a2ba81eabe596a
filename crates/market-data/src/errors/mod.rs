//! Error types for the market data crate.
//!
//! [`MarketDataError`] covers every failure a provider can report. Callers
//! never retry; they only need to tell a data gap (the symbol exists but has
//! nothing to offer for the range) from an upstream failure.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available for the requested date range.
    /// The symbol exists but has no quotes in the specified period.
    #[error("No data for date range")]
    NoDataForRange,

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that could not be converted.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl MarketDataError {
    /// Returns true when the provider answered but had no prices to give.
    ///
    /// # Examples
    ///
    /// ```
    /// use lamina_market_data::errors::MarketDataError;
    ///
    /// assert!(MarketDataError::NoDataForRange.is_data_gap());
    /// assert!(!MarketDataError::SymbolNotFound("XYZ".to_string()).is_data_gap());
    /// ```
    pub fn is_data_gap(&self) -> bool {
        matches!(self, Self::NoDataForRange)
    }
}
