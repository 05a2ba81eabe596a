use chrono::NaiveDate;
use lamina_core::errors::ValidationError;
use lamina_core::portfolios::{PortfolioDefinition, PortfolioKind};
use lamina_core::report::{ConsolidatedTable, IndicatorTable, Report, ReportSelection};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Report selection as sent by the page form and API clients.
///
/// Fields stay strings so malformed values surface as validation errors
/// instead of extractor rejections.
#[derive(Deserialize, IntoParams, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// `crypto` or `international`; defaults to `crypto`
    pub portfolio: Option<String>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    /// YYYY-MM-DD; ignored when the end date is always today
    pub end_date: Option<String>,
}

impl ReportQuery {
    pub fn to_selection(&self) -> Result<ReportSelection, ValidationError> {
        let portfolio = match non_empty(&self.portfolio) {
            Some(value) => value.parse::<PortfolioKind>()?,
            None => PortfolioKind::Crypto,
        };
        Ok(ReportSelection {
            portfolio,
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
        })
    }

    /// Query string reproducing this selection, for links.
    pub fn to_query_string(&self) -> String {
        [
            ("portfolio", &self.portfolio),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
        ]
        .iter()
        .filter_map(|(key, value)| {
            non_empty(value).map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect::<Vec<_>>()
        .join("&")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(value: &Option<String>) -> Result<Option<NaiveDate>, ValidationError> {
    non_empty(value)
        .map(|v| NaiveDate::parse_from_str(v, DATE_FORMAT))
        .transpose()
        .map_err(ValidationError::from)
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResponse {
    pub symbol: String,
    pub label: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WeightResponse {
    pub symbol: String,
    pub weight: f64,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub id: String,
    pub name: String,
    pub benchmark: BenchmarkResponse,
    pub weights: Vec<WeightResponse>,
}

impl From<PortfolioDefinition> for PortfolioResponse {
    fn from(p: PortfolioDefinition) -> Self {
        Self {
            id: p.kind.as_str().to_string(),
            name: p.name,
            benchmark: BenchmarkResponse {
                symbol: p.benchmark.symbol,
                label: p.benchmark.label,
            },
            weights: p
                .weights
                .iter()
                .map(|w| WeightResponse {
                    symbol: w.symbol.clone(),
                    weight: w.weight,
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPointResponse {
    pub date: NaiveDate,
    pub portfolio: f64,
    pub benchmark: f64,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TableRowResponse {
    pub label: String,
    /// Display values, two decimals; "N/A" when undefined
    pub cells: Vec<String>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TableResponse {
    pub headers: Vec<String>,
    pub rows: Vec<TableRowResponse>,
}

impl From<&ConsolidatedTable> for TableResponse {
    fn from(table: &ConsolidatedTable) -> Self {
        Self {
            headers: table.headers(),
            rows: table
                .rows
                .iter()
                .map(|row| TableRowResponse {
                    label: row.label.clone(),
                    cells: row.cells().iter().map(|c| format!("{:.2}", c)).collect(),
                })
                .collect(),
        }
    }
}

impl From<&IndicatorTable> for TableResponse {
    fn from(table: &IndicatorTable) -> Self {
        Self {
            headers: table.headers().iter().map(|h| h.to_string()).collect(),
            rows: table
                .rows
                .iter()
                .map(|row| TableRowResponse {
                    label: row.label.clone(),
                    cells: row.display_cells().to_vec(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub portfolio: String,
    pub portfolio_name: String,
    pub benchmark: BenchmarkResponse,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub as_of: NaiveDate,
    pub series: Vec<SeriesPointResponse>,
    pub consolidated: TableResponse,
    pub indicators: TableResponse,
}

impl From<&Report> for ReportResponse {
    fn from(report: &Report) -> Self {
        let series = report
            .series
            .portfolio
            .points
            .iter()
            .zip(&report.series.benchmark.points)
            .map(|(p, b)| SeriesPointResponse {
                date: p.date,
                portfolio: p.value,
                benchmark: b.value,
            })
            .collect();

        Self {
            portfolio: report.portfolio.as_str().to_string(),
            portfolio_name: report.portfolio_name.clone(),
            benchmark: BenchmarkResponse {
                symbol: report.benchmark.symbol.clone(),
                label: report.benchmark.label.clone(),
            },
            start_date: report.period.start,
            end_date: report.period.end,
            as_of: report.as_of,
            series,
            consolidated: (&report.consolidated).into(),
            indicators: (&report.indicators).into(),
        }
    }
}
