//! Price series normalization.
//!
//! Independently fetched close series are outer-joined on the union of their
//! dates, then every date missing a price in any column is dropped. The
//! result is dense: each row holds a price for each column.

use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

use super::report_model::PriceSeries;
use crate::errors::ReportError;

/// Dense date-indexed table of close prices, one column per symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    symbols: Vec<String>,
    dates: Vec<NaiveDate>,
    rows: Vec<Vec<f64>>,
}

impl PriceTable {
    /// Joins `series` into a dense table.
    ///
    /// Non-finite and non-positive closes count as missing. A series with no
    /// usable price, or a join leaving fewer than two dates, is
    /// [`ReportError::DataUnavailable`].
    pub fn from_series(series: &[PriceSeries]) -> Result<Self, ReportError> {
        if series.is_empty() {
            return Err(ReportError::DataUnavailable(
                "no price series to normalize".to_string(),
            ));
        }

        let width = series.len();
        let mut joined: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

        for (column, s) in series.iter().enumerate() {
            let mut usable = 0usize;
            for point in s.points.iter().filter(|p| p.close.is_finite() && p.close > 0.0) {
                joined.entry(point.date).or_insert_with(|| vec![None; width])[column] =
                    Some(point.close);
                usable += 1;
            }
            if usable == 0 {
                return Err(ReportError::DataUnavailable(format!(
                    "no prices returned for '{}'",
                    s.symbol
                )));
            }
        }

        let observed = joined.len();
        let (dates, rows): (Vec<_>, Vec<_>) = joined
            .into_iter()
            .filter_map(|(date, row)| {
                row.into_iter()
                    .collect::<Option<Vec<f64>>>()
                    .map(|dense| (date, dense))
            })
            .unzip();

        debug!(
            "Normalized {} columns: kept {} of {} dates",
            width,
            dates.len(),
            observed
        );

        let symbols: Vec<String> = series.iter().map(|s| s.symbol.clone()).collect();
        if dates.len() < 2 {
            return Err(ReportError::DataUnavailable(format!(
                "only {} date(s) with prices for all of {}",
                dates.len(),
                symbols.join(", ")
            )));
        }

        Ok(Self {
            symbols,
            dates,
            rows,
        })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Prices of one column in date order.
    pub fn column(&self, symbol: &str) -> Option<Vec<f64>> {
        let index = self.symbols.iter().position(|s| s == symbol)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::report_model::PricePoint;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(symbol: &str, points: &[(NaiveDate, f64)]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            points
                .iter()
                .map(|(date, close)| PricePoint {
                    date: *date,
                    close: *close,
                })
                .collect(),
        )
    }

    #[test]
    fn test_outer_join_drops_incomplete_rows() {
        let a = series(
            "A",
            &[
                (date(2024, 1, 2), 10.0),
                (date(2024, 1, 3), 11.0),
                (date(2024, 1, 4), 12.0),
            ],
        );
        // B trades on the 5th but skips the 3rd.
        let b = series(
            "B",
            &[
                (date(2024, 1, 2), 20.0),
                (date(2024, 1, 4), 19.0),
                (date(2024, 1, 5), 18.0),
            ],
        );

        let table = PriceTable::from_series(&[a, b]).unwrap();
        assert_eq!(table.dates(), &[date(2024, 1, 2), date(2024, 1, 4)]);
        assert_eq!(table.rows(), &[vec![10.0, 20.0], vec![12.0, 19.0]]);
        assert_eq!(table.column("B"), Some(vec![20.0, 19.0]));
        assert_eq!(table.column("C"), None);
    }

    #[test]
    fn test_dates_sorted_regardless_of_input_order() {
        let a = series("A", &[(date(2024, 1, 3), 11.0), (date(2024, 1, 2), 10.0)]);
        let table = PriceTable::from_series(&[a]).unwrap();
        assert_eq!(table.dates(), &[date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(table.column("A"), Some(vec![10.0, 11.0]));
    }

    #[test]
    fn test_empty_series_is_data_unavailable() {
        let a = series("A", &[(date(2024, 1, 2), 10.0), (date(2024, 1, 3), 11.0)]);
        let empty = series("NOPE", &[]);
        let err = PriceTable::from_series(&[a, empty]).unwrap_err();
        assert!(matches!(err, ReportError::DataUnavailable(msg) if msg.contains("NOPE")));
    }

    #[test]
    fn test_non_positive_prices_count_as_missing() {
        let a = series(
            "A",
            &[
                (date(2024, 1, 2), 10.0),
                (date(2024, 1, 3), 0.0),
                (date(2024, 1, 4), f64::NAN),
                (date(2024, 1, 5), 12.0),
            ],
        );
        let table = PriceTable::from_series(&[a]).unwrap();
        assert_eq!(table.dates(), &[date(2024, 1, 2), date(2024, 1, 5)]);
    }

    #[test]
    fn test_single_common_date_is_data_unavailable() {
        let a = series("A", &[(date(2024, 1, 2), 10.0), (date(2024, 1, 3), 11.0)]);
        let b = series("B", &[(date(2024, 1, 3), 20.0), (date(2024, 1, 4), 21.0)]);
        let err = PriceTable::from_series(&[a, b]).unwrap_err();
        assert!(matches!(err, ReportError::DataUnavailable(_)));
    }

    #[test]
    fn test_no_series_is_data_unavailable() {
        assert!(PriceTable::from_series(&[]).is_err());
    }
}
