//! Lâmina Market Data Crate
//!
//! This crate fetches historical daily closes for the report pipeline.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  Report service  | --> |    Provider      | --> |     Quote        |
//! +------------------+     +------------------+     +------------------+
//!                            (Yahoo, fixtures)        (date, close)
//! ```
//!
//! # Core Types
//!
//! - [`MarketDataProvider`] - Price source abstraction
//! - [`Quote`] - Daily close quote
//! - [`MarketDataError`] - Provider failures

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
