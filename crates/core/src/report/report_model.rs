use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::ReportError;
use crate::portfolios::{Benchmark, PortfolioKind};

pub const YEAR_COLUMN: &str = "Year";
pub const TRAILING_COLUMN: &str = "12 Months";
pub const PERIOD_COLUMN: &str = "Period";

pub const INDICATOR_COLUMNS: [&str; 4] = [
    "Annual Volatility (%)",
    "Annual Return (%)",
    "Sharpe (CDI=9%)",
    "Max Drawdown (%)",
];

/// Display text for an indicator that cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Raw close prices of one column, as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Column name (the ticker, or the cash symbol for the proxy)
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Compounded value of one tracked series, indexed to the base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSeries {
    pub label: String,
    pub points: Vec<ValuePoint>,
}

impl ValueSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn first_value(&self) -> Option<f64> {
        self.points.first().map(|p| p.value)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }
}

/// Portfolio and benchmark value series over the same dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedSeries {
    pub portfolio: ValueSeries,
    pub benchmark: ValueSeries,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.portfolio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }

    /// Both series, portfolio first.
    pub fn tracked(&self) -> [&ValueSeries; 2] {
        [&self.portfolio, &self.benchmark]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReturn {
    /// Column label, e.g. "Mar/24"
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedRow {
    pub label: String,
    pub year_to_date: Decimal,
    pub trailing_twelve_months: Decimal,
    pub period: Decimal,
    /// Most recent month first
    pub months: Vec<MonthlyReturn>,
}

impl ConsolidatedRow {
    /// Cell values in column order.
    pub fn cells(&self) -> Vec<Decimal> {
        let mut cells = vec![self.year_to_date, self.trailing_twelve_months, self.period];
        cells.extend(self.months.iter().map(|m| m.value));
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedTable {
    pub rows: Vec<ConsolidatedRow>,
}

impl ConsolidatedTable {
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            YEAR_COLUMN.to_string(),
            TRAILING_COLUMN.to_string(),
            PERIOD_COLUMN.to_string(),
        ];
        if let Some(row) = self.rows.first() {
            headers.extend(row.months.iter().map(|m| m.label.clone()));
        }
        headers
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorRow {
    pub label: String,
    pub annual_volatility: Decimal,
    pub annual_return: Decimal,
    /// `None` when volatility is zero and the ratio is undefined
    pub sharpe: Option<Decimal>,
    pub max_drawdown: Decimal,
}

impl IndicatorRow {
    /// Display strings in column order.
    pub fn display_cells(&self) -> [String; 4] {
        [
            format!("{:.2}", self.annual_volatility),
            format!("{:.2}", self.annual_return),
            self.sharpe
                .map_or_else(|| NOT_AVAILABLE.to_string(), |s| format!("{:.2}", s)),
            format!("{:.2}", self.max_drawdown),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorTable {
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub fn headers(&self) -> [&'static str; 4] {
        INDICATOR_COLUMNS
    }
}

/// How the report end date is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EndDateMode {
    /// The end date is always today; a caller-supplied end date is ignored.
    Today,
    /// The caller picks the end date; today when omitted.
    #[default]
    UserSelected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    pub show_styled_tables: bool,
    pub end_date_mode: EndDateMode,
    pub default_start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSelection {
    pub portfolio: PortfolioKind,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReportSelection {
    pub fn new(portfolio: PortfolioKind) -> Self {
        Self {
            portfolio,
            start_date: None,
            end_date: None,
        }
    }
}

/// Inclusive date range prices are requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub portfolio: PortfolioKind,
    pub portfolio_name: String,
    pub benchmark: Benchmark,
    pub period: ReportPeriod,
    /// Date the year-to-date column is anchored to
    pub as_of: NaiveDate,
    pub series: AlignedSeries,
    pub consolidated: ConsolidatedTable,
    pub indicators: IndicatorTable,
}

/// Rounds a percentage for display, rejecting NaN and infinities.
///
/// Values rounding to zero are always positive zero.
pub(crate) fn display_value(value: f64, what: &str) -> Result<Decimal, ReportError> {
    let mut rounded = Decimal::from_f64_retain(value)
        .map(|d| d.round_dp(DISPLAY_DECIMAL_PRECISION))
        .ok_or_else(|| ReportError::Calculation(format!("{} is not a finite number", what)))?;
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    Ok(rounded)
}
