//! Report generation service implementation.

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use lamina_market_data::MarketDataProvider;

use super::aggregation::{align, benchmark_value_series, portfolio_value_series};
use super::consolidation::build_consolidated_table;
use super::indicators::build_indicator_table;
use super::price_table::PriceTable;
use super::report_model::{
    EndDateMode, PricePoint, PriceSeries, Report, ReportOptions, ReportPeriod, ReportSelection,
};
use super::report_traits::ReportServiceTrait;
use crate::constants::{BASE_VALUE, CASH_PROXY_SYMBOL, CASH_SYMBOL};
use crate::errors::{Error, Result, ValidationError};
use crate::portfolios::{PortfolioDefinition, PortfolioKind};

/// Derives a report from already fetched prices.
///
/// `prices` holds one series per weighted column, the cash proxy stored
/// under the cash symbol. `as_of` anchors the year-to-date column.
pub fn build_report(
    definition: &PortfolioDefinition,
    period: ReportPeriod,
    prices: &[PriceSeries],
    benchmark: &PriceSeries,
    as_of: NaiveDate,
) -> Result<Report> {
    let table = PriceTable::from_series(prices)?;
    let portfolio = portfolio_value_series(&table, &definition.weights, BASE_VALUE)?;
    let benchmark_values =
        benchmark_value_series(&definition.benchmark.label, benchmark, BASE_VALUE)?;
    let series = align(portfolio, benchmark_values, BASE_VALUE)?;

    let consolidated = build_consolidated_table(&series, as_of)?;
    let indicators = build_indicator_table(&series)?;

    Ok(Report {
        portfolio: definition.kind,
        portfolio_name: definition.name.clone(),
        benchmark: definition.benchmark.clone(),
        period,
        as_of,
        series,
        consolidated,
        indicators,
    })
}

/// Service fetching prices and building reports.
pub struct ReportService {
    provider: Arc<dyn MarketDataProvider>,
    options: ReportOptions,
}

impl ReportService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, options: ReportOptions) -> Self {
        Self { provider, options }
    }

    /// Date range for `selection` given the current date.
    pub fn resolve_period(
        &self,
        selection: &ReportSelection,
        today: NaiveDate,
    ) -> Result<ReportPeriod> {
        let end = match self.options.end_date_mode {
            EndDateMode::Today => today,
            EndDateMode::UserSelected => selection.end_date.unwrap_or(today),
        };
        let start = selection
            .start_date
            .unwrap_or(self.options.default_start_date);

        if start > end {
            return Err(ValidationError::InvalidDateRange { start, end }.into());
        }
        Ok(ReportPeriod { start, end })
    }

    /// Same as [`ReportServiceTrait::generate_report`] with an explicit
    /// current date.
    pub async fn generate_report_as_of(
        &self,
        selection: &ReportSelection,
        today: NaiveDate,
    ) -> Result<Report> {
        let period = self.resolve_period(selection, today)?;
        let definition = selection.portfolio.definition();
        info!(
            "Generating report for '{}' from {} to {}",
            definition.name, period.start, period.end
        );

        let mut prices = Vec::with_capacity(definition.weights.len());
        for symbol in definition.weights.priced_symbols() {
            prices.push(self.fetch_prices(symbol, symbol, &period).await?);
        }
        if definition.weights.has_cash() {
            prices.push(
                self.fetch_prices(CASH_SYMBOL, CASH_PROXY_SYMBOL, &period)
                    .await?,
            );
        }
        let benchmark = self
            .fetch_prices(
                &definition.benchmark.symbol,
                &definition.benchmark.symbol,
                &period,
            )
            .await?;

        build_report(&definition, period, &prices, &benchmark, today)
    }

    /// Fetches closes of `symbol` into a series named `column`.
    ///
    /// A provider reporting no data for the range yields an empty series;
    /// normalization turns that into a data error naming the column.
    async fn fetch_prices(
        &self,
        column: &str,
        symbol: &str,
        period: &ReportPeriod,
    ) -> Result<PriceSeries> {
        let start = Utc.from_utc_datetime(&period.start.and_time(NaiveTime::MIN));
        let end = Utc.from_utc_datetime(&period.end.and_time(NaiveTime::MIN));

        match self.provider.get_historical_quotes(symbol, start, end).await {
            Ok(quotes) => {
                let points: Vec<PricePoint> = quotes
                    .iter()
                    .filter_map(|q| {
                        q.close_f64().map(|close| PricePoint {
                            date: q.date(),
                            close,
                        })
                    })
                    .collect();
                debug!(
                    "Fetched {} closes for '{}' from {}",
                    points.len(),
                    symbol,
                    self.provider.id()
                );
                Ok(PriceSeries::new(column, points))
            }
            Err(e) if e.is_data_gap() => {
                warn!("No prices for '{}' in {:?}: {}", symbol, period, e);
                Ok(PriceSeries::new(column, Vec::new()))
            }
            Err(source) => Err(Error::UpstreamFetch {
                ticker: symbol.to_string(),
                source,
            }),
        }
    }
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    async fn generate_report(&self, selection: &ReportSelection) -> Result<Report> {
        let today = Local::now().date_naive();
        self.generate_report_as_of(selection, today).await
    }

    fn options(&self) -> &ReportOptions {
        &self.options
    }

    fn portfolios(&self) -> Vec<PortfolioDefinition> {
        PortfolioKind::ALL.iter().map(|k| k.definition()).collect()
    }
}
