//! Market data models
//!
//! - `quote` - Daily close quote returned by providers (Quote)

mod quote;

pub use quote::Quote;
