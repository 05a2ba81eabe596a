//! Consolidated returns table.
//!
//! Mixes four granularities per tracked series: year-to-date, trailing
//! twelve months, the whole period and each of the last twelve months.
//! The trailing figure is the plain sum of the monthly percentages, not
//! their compound.

use chrono::{Datelike, NaiveDate};

use super::report_model::{
    display_value, AlignedSeries, ConsolidatedRow, ConsolidatedTable, MonthlyReturn, ValuePoint,
    ValueSeries,
};
use crate::constants::TRAILING_MONTHS;
use crate::errors::ReportError;

/// Last observed value of a calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthEnd {
    pub year: i32,
    pub month: u32,
    pub value: f64,
}

/// Percent return of a calendar month against the previous month end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPercent {
    pub year: i32,
    pub month: u32,
    pub percent: f64,
}

/// One entry per calendar month with at least one observation.
pub fn month_end_values(points: &[ValuePoint]) -> Vec<MonthEnd> {
    let mut month_ends: Vec<MonthEnd> = Vec::new();
    for point in points {
        let (year, month) = (point.date.year(), point.date.month());
        match month_ends.last_mut() {
            Some(last) if last.year == year && last.month == month => last.value = point.value,
            _ => month_ends.push(MonthEnd {
                year,
                month,
                value: point.value,
            }),
        }
    }
    month_ends
}

/// Month-over-month percent returns; the first month has none.
pub fn monthly_returns(month_ends: &[MonthEnd]) -> Vec<MonthlyPercent> {
    month_ends
        .windows(2)
        .map(|w| MonthlyPercent {
            year: w[1].year,
            month: w[1].month,
            percent: (w[1].value / w[0].value - 1.0) * 100.0,
        })
        .collect()
}

/// The last `TRAILING_MONTHS` monthly returns, oldest first.
pub fn trailing_months(monthly: &[MonthlyPercent]) -> &[MonthlyPercent] {
    &monthly[monthly.len().saturating_sub(TRAILING_MONTHS)..]
}

/// Additive trailing aggregate of monthly percentages.
pub fn trailing_sum(monthly: &[MonthlyPercent]) -> f64 {
    monthly.iter().map(|m| m.percent).sum()
}

/// Percent change between the first and last value of `points`.
pub fn period_return(points: &[ValuePoint]) -> Result<f64, ReportError> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if first.value != 0.0 => {
            Ok((last.value / first.value - 1.0) * 100.0)
        }
        (Some(_), Some(_)) => Err(ReportError::Calculation(
            "series starts at zero".to_string(),
        )),
        _ => Err(ReportError::InsufficientData(
            "no observations in the selected range".to_string(),
        )),
    }
}

/// Percent change over the observations falling in `year`.
pub fn year_to_date_return(points: &[ValuePoint], year: i32) -> Result<f64, ReportError> {
    let ytd: Vec<ValuePoint> = points
        .iter()
        .filter(|p| p.date.year() == year)
        .copied()
        .collect();
    if ytd.is_empty() {
        return Err(ReportError::InsufficientData(format!(
            "no observations in {} for the year-to-date return",
            year
        )));
    }
    period_return(&ytd)
}

/// Column label of a month, e.g. "Mar/24".
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b/%y").to_string())
        .unwrap_or_else(|| format!("{:02}/{:02}", month, year.rem_euclid(100)))
}

fn consolidated_row(series: &ValueSeries, as_of: NaiveDate) -> Result<ConsolidatedRow, ReportError> {
    let monthly = monthly_returns(&month_end_values(&series.points));
    let trailing = trailing_months(&monthly);
    if trailing.is_empty() {
        return Err(ReportError::InsufficientData(format!(
            "'{}' needs at least two calendar months for monthly returns",
            series.label
        )));
    }

    let year_to_date = year_to_date_return(&series.points, as_of.year())?;
    let period = period_return(&series.points)?;

    let months = trailing
        .iter()
        .rev()
        .map(|m| {
            Ok(MonthlyReturn {
                label: month_label(m.year, m.month),
                year: m.year,
                month: m.month,
                value: display_value(m.percent, "monthly return")?,
            })
        })
        .collect::<Result<Vec<_>, ReportError>>()?;

    Ok(ConsolidatedRow {
        label: series.label.clone(),
        year_to_date: display_value(year_to_date, "year-to-date return")?,
        trailing_twelve_months: display_value(trailing_sum(trailing), "12-month return")?,
        period: display_value(period, "period return")?,
        months,
    })
}

/// Builds the consolidated table, portfolio row first.
///
/// `as_of` selects the calendar year of the year-to-date column.
pub fn build_consolidated_table(
    series: &AlignedSeries,
    as_of: NaiveDate,
) -> Result<ConsolidatedTable, ReportError> {
    let rows = series
        .tracked()
        .into_iter()
        .map(|s| consolidated_row(s, as_of))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ConsolidatedTable { rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(y: i32, m: u32, d: u32, value: f64) -> ValuePoint {
        ValuePoint {
            date: date(y, m, d),
            value,
        }
    }

    fn value_series(label: &str, points: Vec<ValuePoint>) -> ValueSeries {
        ValueSeries {
            label: label.to_string(),
            points,
        }
    }

    #[test]
    fn test_month_end_takes_last_observation() {
        let points = vec![
            point(2024, 1, 2, 100.0),
            point(2024, 1, 31, 105.0),
            point(2024, 2, 1, 106.0),
            point(2024, 2, 15, 110.0),
        ];
        let ends = month_end_values(&points);
        assert_eq!(
            ends,
            vec![
                MonthEnd {
                    year: 2024,
                    month: 1,
                    value: 105.0
                },
                MonthEnd {
                    year: 2024,
                    month: 2,
                    value: 110.0
                },
            ]
        );
    }

    #[test]
    fn test_monthly_returns_skip_first_month() {
        let ends = vec![
            MonthEnd {
                year: 2023,
                month: 12,
                value: 100.0,
            },
            MonthEnd {
                year: 2024,
                month: 1,
                value: 110.0,
            },
        ];
        let monthly = monthly_returns(&ends);
        assert_eq!(monthly.len(), 1);
        assert_eq!((monthly[0].year, monthly[0].month), (2024, 1));
        assert!((monthly[0].percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_trailing_sum_is_additive() {
        let monthly = vec![
            MonthlyPercent {
                year: 2024,
                month: 1,
                percent: 10.0,
            },
            MonthlyPercent {
                year: 2024,
                month: 2,
                percent: 10.0,
            },
        ];
        // Compounded would be 21.0.
        assert!((trailing_sum(&monthly) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_year_to_date_uses_current_year_subset() {
        let points = vec![
            point(2023, 12, 29, 100.0),
            point(2024, 1, 2, 120.0),
            point(2024, 3, 1, 150.0),
        ];
        let ytd = year_to_date_return(&points, 2024).unwrap();
        assert!((ytd - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_year_to_date_without_observations_fails() {
        let points = vec![point(2023, 12, 29, 100.0)];
        let err = year_to_date_return(&points, 2024).unwrap_err();
        assert!(matches!(err, ReportError::InsufficientData(_)));
    }

    #[test]
    fn test_period_return_on_empty_series_fails() {
        assert!(matches!(
            period_return(&[]),
            Err(ReportError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(2024, 3), "Mar/24");
        assert_eq!(month_label(2025, 12), "Dec/25");
    }

    #[test]
    fn test_table_columns_most_recent_first() {
        let points = vec![
            point(2024, 1, 31, 100.0),
            point(2024, 2, 29, 110.0),
            point(2024, 3, 29, 99.0),
        ];
        let aligned = AlignedSeries {
            portfolio: value_series("Carteira", points.clone()),
            benchmark: value_series("S&P500", points),
        };

        let table = build_consolidated_table(&aligned, date(2024, 6, 1)).unwrap();
        assert_eq!(
            table.headers(),
            vec!["Year", "12 Months", "Period", "Mar/24", "Feb/24"]
        );
        let row = &table.rows[0];
        assert_eq!(row.label, "Carteira");
        assert_eq!(row.months[0].value, dec!(-10));
        assert_eq!(row.months[1].value, dec!(10));
        assert_eq!(row.trailing_twelve_months, dec!(0));
        assert_eq!(row.period, dec!(-1));
        assert_eq!(row.year_to_date, dec!(-1));
        assert_eq!(table.rows[1].label, "S&P500");
    }

    #[test]
    fn test_single_month_is_insufficient() {
        let points = vec![point(2024, 1, 2, 100.0), point(2024, 1, 3, 101.0)];
        let aligned = AlignedSeries {
            portfolio: value_series("Carteira", points.clone()),
            benchmark: value_series("S&P500", points),
        };
        let err = build_consolidated_table(&aligned, date(2024, 1, 3)).unwrap_err();
        assert!(matches!(err, ReportError::InsufficientData(_)));
    }
}
