use chrono::{DateTime, NaiveDate, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily market data quote
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Timestamp of the quote
    pub timestamp: DateTime<Utc>,

    /// Dividend- and split-adjusted closing price
    pub close: Decimal,
}

impl Quote {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self { timestamp, close }
    }

    /// Trading date of the quote.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Close price as a float, `None` when it cannot be represented.
    pub fn close_f64(&self) -> Option<f64> {
        self.close.to_f64().filter(|v| v.is_finite())
    }
}
