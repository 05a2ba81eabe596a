//! Weighted return aggregation and value series compounding.
//!
//! Portfolio returns are the weight-linear sum of per-asset simple returns,
//! which approximates a daily-rebalanced portfolio. The benchmark is
//! compounded from its own prices. Both are indexed to the same base value
//! and cut down to the dates they share.

use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeSet;

use super::price_table::PriceTable;
use super::report_model::{AlignedSeries, PriceSeries, ValuePoint, ValueSeries};
use crate::constants::PORTFOLIO_LABEL;
use crate::errors::ReportError;
use crate::portfolios::WeightVector;

/// Row-over-row simple returns; one element shorter than `prices`.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Weighted portfolio return for every price row after the first.
///
/// Columns without a weight contribute nothing.
pub fn portfolio_returns(table: &PriceTable, weights: &WeightVector) -> Vec<(NaiveDate, f64)> {
    let column_weights: Vec<f64> = table
        .symbols()
        .iter()
        .map(|symbol| weights.weight_of(symbol))
        .collect();

    table
        .rows()
        .windows(2)
        .zip(table.dates().iter().skip(1))
        .map(|(pair, date)| {
            let weighted = pair[1]
                .iter()
                .zip(&pair[0])
                .zip(&column_weights)
                .map(|((current, previous), weight)| (current / previous - 1.0) * weight)
                .sum::<f64>();
            (*date, weighted)
        })
        .collect()
}

/// Compounds `returns` into a value series starting at `base` on `start`.
pub fn compound(
    label: &str,
    start: NaiveDate,
    returns: &[(NaiveDate, f64)],
    base: f64,
) -> ValueSeries {
    let mut points = Vec::with_capacity(returns.len() + 1);
    points.push(ValuePoint { date: start, value: base });

    let mut growth = 1.0_f64;
    for (date, r) in returns {
        growth *= 1.0 + r;
        points.push(ValuePoint {
            date: *date,
            value: base * growth,
        });
    }

    ValueSeries {
        label: label.to_string(),
        points,
    }
}

/// Portfolio value series from a normalized price table.
pub fn portfolio_value_series(
    table: &PriceTable,
    weights: &WeightVector,
    base: f64,
) -> Result<ValueSeries, ReportError> {
    let start = *table.dates().first().ok_or_else(|| {
        ReportError::DataUnavailable("portfolio price table is empty".to_string())
    })?;
    let returns = portfolio_returns(table, weights);
    Ok(compound(PORTFOLIO_LABEL, start, &returns, base))
}

/// Benchmark value series compounded from its own raw prices.
pub fn benchmark_value_series(
    label: &str,
    prices: &PriceSeries,
    base: f64,
) -> Result<ValueSeries, ReportError> {
    let table = PriceTable::from_series(std::slice::from_ref(prices))?;
    let closes = table.column(&prices.symbol).unwrap_or_default();
    let returns: Vec<(NaiveDate, f64)> = table
        .dates()
        .iter()
        .skip(1)
        .copied()
        .zip(simple_returns(&closes))
        .collect();
    Ok(compound(label, table.dates()[0], &returns, base))
}

/// Restricts both series to their common dates, re-indexed to `base`.
pub fn align(
    portfolio: ValueSeries,
    benchmark: ValueSeries,
    base: f64,
) -> Result<AlignedSeries, ReportError> {
    let benchmark_dates: BTreeSet<NaiveDate> = benchmark.dates().collect();
    let common: BTreeSet<NaiveDate> = portfolio
        .dates()
        .filter(|d| benchmark_dates.contains(d))
        .collect();

    debug!(
        "Aligning '{}' ({} dates) with '{}' ({} dates): {} in common",
        portfolio.label,
        portfolio.len(),
        benchmark.label,
        benchmark.len(),
        common.len()
    );

    if common.is_empty() {
        return Err(ReportError::EmptyIntersection {
            portfolio: portfolio.label,
            benchmark: benchmark.label,
        });
    }

    Ok(AlignedSeries {
        portfolio: rebase(restrict(portfolio, &common), base)?,
        benchmark: rebase(restrict(benchmark, &common), base)?,
    })
}

fn restrict(series: ValueSeries, dates: &BTreeSet<NaiveDate>) -> ValueSeries {
    ValueSeries {
        label: series.label,
        points: series
            .points
            .into_iter()
            .filter(|p| dates.contains(&p.date))
            .collect(),
    }
}

fn rebase(series: ValueSeries, base: f64) -> Result<ValueSeries, ReportError> {
    let first = series.first_value().unwrap_or(base);
    if first == base {
        return Ok(series);
    }
    if !first.is_finite() || first <= 0.0 {
        return Err(ReportError::Calculation(format!(
            "'{}' has no positive value to index from",
            series.label
        )));
    }
    let factor = base / first;
    Ok(ValueSeries {
        label: series.label,
        points: series
            .points
            .into_iter()
            .map(|p| ValuePoint {
                date: p.date,
                value: p.value * factor,
            })
            .collect(),
    })
}
