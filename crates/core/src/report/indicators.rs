//! Risk and return indicators.
//!
//! All figures come from the daily value series. Percentages are returned
//! as percent (12.5 means 12.5%), the drawdown as a non-positive number.

use super::aggregation::simple_returns;
use super::report_model::{display_value, AlignedSeries, IndicatorRow, IndicatorTable, ValueSeries};
use crate::constants::{RISK_FREE_RATE_PCT, TRADING_DAYS_PER_YEAR, VOLATILITY_EPSILON};
use crate::errors::ReportError;

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1.0);
    Some(var.sqrt())
}

/// Annualized volatility of daily returns, in percent.
pub fn annual_volatility(values: &[f64]) -> Result<f64, ReportError> {
    let returns = simple_returns(values);
    let std = sample_std(&returns).ok_or_else(|| {
        ReportError::InsufficientData(format!(
            "volatility needs at least two daily returns, got {}",
            returns.len()
        ))
    })?;
    Ok(std * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
}

/// Annualized return, in percent, assuming one observation per trading day.
pub fn annual_return(values: &[f64]) -> Result<f64, ReportError> {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) if *first > 0.0 => {
            let exponent = TRADING_DAYS_PER_YEAR / values.len() as f64;
            Ok(((last / first).powf(exponent) - 1.0) * 100.0)
        }
        (Some(_), Some(_)) => Err(ReportError::Calculation(
            "annual return needs a positive starting value".to_string(),
        )),
        _ => Err(ReportError::InsufficientData(
            "annual return needs at least one value".to_string(),
        )),
    }
}

/// Excess annual return over the reference rate per unit of volatility.
///
/// `None` when volatility is zero.
pub fn sharpe_like(annual_return_pct: f64, annual_volatility_pct: f64) -> Option<f64> {
    if annual_volatility_pct.abs() <= VOLATILITY_EPSILON {
        return None;
    }
    Some((annual_return_pct - RISK_FREE_RATE_PCT) / annual_volatility_pct)
}

/// Deepest fall from a running peak, in percent. Always <= 0.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for value in values {
        peak = peak.max(*value);
        if peak > 0.0 {
            worst = worst.min(value / peak - 1.0);
        }
    }
    worst * 100.0
}

fn indicator_row(series: &ValueSeries) -> Result<IndicatorRow, ReportError> {
    let values = series.values();
    let volatility = annual_volatility(&values)?;
    let annual = annual_return(&values)?;
    let sharpe = sharpe_like(annual, volatility)
        .map(|s| display_value(s, "sharpe ratio"))
        .transpose()?;

    Ok(IndicatorRow {
        label: series.label.clone(),
        annual_volatility: display_value(volatility, "annual volatility")?,
        annual_return: display_value(annual, "annual return")?,
        sharpe,
        max_drawdown: display_value(max_drawdown(&values), "max drawdown")?,
    })
}

/// Builds the indicators table, portfolio row first.
pub fn build_indicator_table(series: &AlignedSeries) -> Result<IndicatorTable, ReportError> {
    let rows = series
        .tracked()
        .into_iter()
        .map(indicator_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(IndicatorTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::report_model::{ValuePoint, NOT_AVAILABLE};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn value_series(label: &str, values: &[f64]) -> ValueSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        ValueSeries {
            label: label.to_string(),
            points: values
                .iter()
                .enumerate()
                .map(|(i, v)| ValuePoint {
                    date: start + chrono::Duration::days(i as i64),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn test_volatility_uses_sample_std() {
        // returns: +10%, -10%; sample std = sqrt(0.02)
        let vol = annual_volatility(&[100.0, 110.0, 99.0]).unwrap();
        let expected = 0.02_f64.sqrt() * 252.0_f64.sqrt() * 100.0;
        assert!((vol - expected).abs() < 1e-9);
    }

    #[test]
    fn test_volatility_needs_two_returns() {
        let err = annual_volatility(&[100.0, 101.0]).unwrap_err();
        assert!(matches!(err, ReportError::InsufficientData(_)));
    }

    #[test]
    fn test_annual_return_flat_series_is_zero() {
        let r = annual_return(&[100.0, 100.0, 100.0]).unwrap();
        assert!(r.abs() < 1e-12);
    }

    #[test]
    fn test_annual_return_exponent_uses_value_count() {
        let r = annual_return(&[100.0, 105.0]).unwrap();
        let expected = (1.05_f64.powf(126.0) - 1.0) * 100.0;
        assert!((r - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_sharpe_like_subtracts_reference_rate() {
        let s = sharpe_like(19.0, 20.0).unwrap();
        assert!((s - 0.5).abs() < 1e-12);
        assert_eq!(sharpe_like(19.0, 0.0), None);
    }

    #[test]
    fn test_max_drawdown() {
        assert!((max_drawdown(&[100.0, 120.0, 90.0, 130.0, 117.0]) - (-25.0)).abs() < 1e-9);
        assert_eq!(max_drawdown(&[100.0, 110.0, 121.0]), 0.0);
    }

    #[test]
    fn test_constant_growth_has_no_sharpe() {
        let aligned = AlignedSeries {
            portfolio: value_series("Carteira", &[100_000.0, 110_000.0, 121_000.0]),
            benchmark: value_series("S&P500", &[100_000.0, 101_000.0, 99_990.0]),
        };
        let table = build_indicator_table(&aligned).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.label, "Carteira");
        assert_eq!(row.annual_volatility, dec!(0));
        assert_eq!(row.max_drawdown, dec!(0));
        assert_eq!(row.sharpe, None);
        assert_eq!(row.display_cells()[2], NOT_AVAILABLE);

        let bench = &table.rows[1];
        assert!(bench.sharpe.is_some());
        assert_eq!(bench.max_drawdown, dec!(-1));
    }
}
