/// Value every series is indexed to on its first aligned date
pub const BASE_VALUE: f64 = 100_000.0;

/// Reserved weight-vector symbol for the cash-equivalent position
pub const CASH_SYMBOL: &str = "CASH";

/// Fixed-income instrument fetched in place of the cash position
pub const CASH_PROXY_SYMBOL: &str = "IRFM11.SA";

/// Row label of the portfolio series in every table
pub const PORTFOLIO_LABEL: &str = "Carteira";

/// Trading days per year used for annualization
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Reference rate (CDI) in percent for the Sharpe-like ratio
pub const RISK_FREE_RATE_PCT: f64 = 9.0;

/// Number of trailing monthly columns in the consolidated table
pub const TRAILING_MONTHS: usize = 12;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Volatility at or below this is treated as zero
pub const VOLATILITY_EPSILON: f64 = 1e-12;

/// Default report start date (year, month, day)
pub const DEFAULT_START_DATE: (i32, u32, u32) = (2022, 5, 1);
