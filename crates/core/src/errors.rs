//! Core error types for the Lâmina report.
//!
//! Every failure of a report request ends up as one [`Error`]. The pipeline
//! checks its preconditions before assembling tables, so a caller gets either
//! a complete report or exactly one of these.

use chrono::{NaiveDate, ParseError as ChronoParseError};
use lamina_market_data::MarketDataError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for report generation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to fetch prices for '{ticker}': {source}")]
    UpstreamFetch {
        ticker: String,
        #[source]
        source: MarketDataError,
    },

    #[error("{0}")]
    Report(#[from] ReportError),
}

impl Error {
    /// True for errors caused by the data available for the selection,
    /// as opposed to bad input or a failing provider.
    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::Report(_))
    }
}

/// Errors that occur while deriving the report from prices.
#[derive(Error, Debug, PartialEq)]
pub enum ReportError {
    #[error("Insufficient data for the selected range/portfolio: {0}")]
    DataUnavailable(String),

    #[error("'{portfolio}' and '{benchmark}' share no trading dates in the selected range")]
    EmptyIntersection { portfolio: String, benchmark: String },

    #[error("Insufficient data for the selected range/portfolio: {0}")]
    InsufficientData(String),

    #[error("Calculation failed: {0}")]
    Calculation(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Start date {start} must not be after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown portfolio: {0}")]
    UnknownPortfolio(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}
