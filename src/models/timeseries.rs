use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::candle::Candle;
use crate::domain::date_selection::{DateRange, DateSelection};
use crate::domain::field::Field;
use crate::utils::time_utils::datetime_to_plot_x;

// ============================================================================
// OhlcvSeries: the loaded daily series, stored column-wise
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct OhlcvSeries {
    pub timestamps: Vec<NaiveDateTime>,

    // Prices
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    pub volumes: Vec<f64>,
}

impl OhlcvSeries {
    /// Builds a series from rows, stable-sorting them by timestamp first.
    pub fn from_candles(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);

        let mut series = OhlcvSeries {
            timestamps: Vec::with_capacity(candles.len()),
            open_prices: Vec::with_capacity(candles.len()),
            high_prices: Vec::with_capacity(candles.len()),
            low_prices: Vec::with_capacity(candles.len()),
            close_prices: Vec::with_capacity(candles.len()),
            volumes: Vec::with_capacity(candles.len()),
        };
        for candle in candles {
            series.timestamps.push(candle.timestamp);
            series.open_prices.push(candle.open_price);
            series.high_prices.push(candle.high_price);
            series.low_prices.push(candle.low_price);
            series.close_prices.push(candle.close_price);
            series.volumes.push(candle.volume);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.timestamps[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    pub fn column(&self, field: Field) -> Option<&[f64]> {
        match field {
            Field::Timestamp => None,
            Field::Open => Some(&self.open_prices),
            Field::High => Some(&self.high_prices),
            Field::Low => Some(&self.low_prices),
            Field::Close => Some(&self.close_prices),
            Field::Volume => Some(&self.volumes),
        }
    }

    /// First and last calendar dates present, or `None` for an empty series.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.timestamps.first()?;
        let last = self.timestamps.last()?;
        Some((first.date(), last.date()))
    }

    pub fn is_sorted_by_time(&self) -> bool {
        self.timestamps.windows(2).all(|w| w[0] <= w[1])
    }

    pub fn full_view(&self) -> SeriesView<'_> {
        SeriesView {
            series: self,
            start_idx: 0,
            end_idx: self.len(),
        }
    }

    pub fn select(&self, selection: DateSelection) -> SeriesView<'_> {
        let range = selection.normalize();
        select_range(self, range.start, range.end)
    }
}

/// Rows whose timestamp's date lies in `[start, end]`, inclusive.
///
/// The series is sorted, so the matching rows are contiguous and located by
/// two binary searches. `start > end` yields an empty view.
pub fn select_range(series: &OhlcvSeries, start: NaiveDate, end: NaiveDate) -> SeriesView<'_> {
    let range = DateRange::new(start, end);
    if range.is_inverted() {
        return SeriesView::empty(series);
    }

    let start_idx = series.timestamps.partition_point(|ts| ts.date() < start);
    let end_idx = series.timestamps.partition_point(|ts| ts.date() <= end);

    SeriesView {
        series,
        start_idx,
        end_idx: end_idx.max(start_idx),
    }
}

// ============================================================================
// SeriesView: read-only contiguous window into an OhlcvSeries
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesView<'a> {
    pub series: &'a OhlcvSeries,
    start_idx: usize, // inclusive
    end_idx: usize,   // exclusive
}

impl<'a> SeriesView<'a> {
    pub fn empty(series: &'a OhlcvSeries) -> Self {
        Self {
            series,
            start_idx: 0,
            end_idx: 0,
        }
    }

    pub fn indices(&self) -> (usize, usize) {
        (self.start_idx, self.end_idx)
    }

    pub fn len(&self) -> usize {
        self.end_idx - self.start_idx
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First `n` rows of the view.
    pub fn head(&self, n: usize) -> SeriesView<'a> {
        SeriesView {
            series: self.series,
            start_idx: self.start_idx,
            end_idx: self.start_idx + n.min(self.len()),
        }
    }

    pub fn timestamps(&self) -> &'a [NaiveDateTime] {
        &self.series.timestamps[self.start_idx..self.end_idx]
    }

    pub fn close_prices(&self) -> &'a [f64] {
        &self.series.close_prices[self.start_idx..self.end_idx]
    }

    pub fn volumes(&self) -> &'a [f64] {
        &self.series.volumes[self.start_idx..self.end_idx]
    }

    /// Numeric column slice; `None` for the timestamp field.
    pub fn column(&self, field: Field) -> Option<&'a [f64]> {
        self.series
            .column(field)
            .map(|col| &col[self.start_idx..self.end_idx])
    }

    /// Plot-space values for any field (timestamps as days since epoch).
    pub fn values(&self, field: Field) -> Vec<f64> {
        match self.column(field) {
            Some(col) => col.to_vec(),
            None => self
                .timestamps()
                .iter()
                .map(|ts| datetime_to_plot_x(*ts))
                .collect(),
        }
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        self.series.get_candle(self.start_idx + idx)
    }

    pub fn candles(&self) -> impl Iterator<Item = Candle> + 'a {
        let series = self.series;
        (self.start_idx..self.end_idx).map(move |idx| series.get_candle(idx))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.timestamps().first().map(|ts| ts.date())
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.timestamps().last().map(|ts| ts.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn candle(day: NaiveDate, hour: u32, close: f64, volume: f64) -> Candle {
        Candle::new(
            day.and_hms_opt(hour, 0, 0).unwrap(),
            close,
            close,
            close,
            close,
            volume,
        )
    }

    fn scenario_series() -> OhlcvSeries {
        OhlcvSeries::from_candles(vec![
            candle(date(2021, 1, 1), 0, 30000.0, 100.0),
            candle(date(2021, 1, 2), 0, 32000.0, 150.0),
            candle(date(2021, 1, 3), 0, 31000.0, 120.0),
        ])
    }

    /// Twelve days, loaded out of order, some with intraday timestamps.
    fn shuffled_series() -> OhlcvSeries {
        let mut rows = Vec::new();
        for (i, day) in [7u32, 3, 11, 1, 5, 9, 2, 12, 4, 10, 6, 8].iter().enumerate() {
            rows.push(candle(date(2021, 3, *day), (i as u32 * 5) % 24, 100.0 + *day as f64, 10.0));
        }
        OhlcvSeries::from_candles(rows)
    }

    #[test]
    fn test_from_candles_sorts_by_time() {
        let series = shuffled_series();
        assert!(series.is_sorted_by_time());
        assert_eq!(series.date_bounds(), Some((date(2021, 3, 1), date(2021, 3, 12))));
    }

    #[test]
    fn test_from_candles_sort_is_stable_for_ties() {
        let ts = date(2021, 1, 1);
        let series = OhlcvSeries::from_candles(vec![
            candle(ts, 0, 1.0, 1.0),
            candle(ts, 0, 2.0, 1.0),
            candle(ts, 0, 3.0, 1.0),
        ]);
        assert_eq!(series.close_prices, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_scenario_two_day_range() {
        let series = scenario_series();
        let view = select_range(&series, date(2021, 1, 1), date(2021, 1, 2));
        assert_eq!(view.len(), 2);
        assert_eq!(view.close_prices(), &[30000.0, 32000.0]);
    }

    #[test]
    fn test_range_outside_series_is_empty() {
        let series = scenario_series();
        let view = select_range(&series, date(2021, 1, 5), date(2021, 1, 10));
        assert!(view.is_empty());
        assert_eq!(view.first_date(), None);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let series = scenario_series();
        let view = select_range(&series, date(2021, 1, 3), date(2021, 1, 1));
        assert!(view.is_empty());
    }

    #[test]
    fn test_single_date_selection() {
        let series = scenario_series();
        let view = series.select(DateSelection::Single(date(2021, 1, 2)));
        assert_eq!(view.len(), 1);
        assert_eq!(view.get_candle(0).close_price, 32000.0);
    }

    #[test]
    fn test_filter_is_exact_for_every_ordered_pair() {
        let series = shuffled_series();
        let days: Vec<NaiveDate> = (0..15)
            .map(|d| date(2021, 2, 27) + chrono::Days::new(d))
            .collect();

        for &start in &days {
            for &end in &days {
                if start > end {
                    continue;
                }
                let view = select_range(&series, start, end);
                let expected: Vec<NaiveDateTime> = series
                    .timestamps
                    .iter()
                    .copied()
                    .filter(|ts| start <= ts.date() && ts.date() <= end)
                    .collect();
                assert_eq!(view.timestamps(), expected.as_slice(), "{start}..{end}");
            }
        }
    }

    #[test]
    fn test_intraday_timestamps_match_on_date_component() {
        let series = OhlcvSeries::from_candles(vec![
            candle(date(2021, 1, 1), 23, 1.0, 1.0),
            candle(date(2021, 1, 2), 12, 2.0, 1.0),
        ]);
        let view = select_range(&series, date(2021, 1, 1), date(2021, 1, 1));
        assert_eq!(view.len(), 1);
        assert_eq!(view.close_prices(), &[1.0]);
    }

    #[test]
    fn test_selection_is_idempotent() {
        let series = shuffled_series();
        let a = select_range(&series, date(2021, 3, 3), date(2021, 3, 8));
        let b = select_range(&series, date(2021, 3, 3), date(2021, 3, 8));
        assert_eq!(a, b);
        assert_eq!(a.candles().collect::<Vec<_>>(), b.candles().collect::<Vec<_>>());
    }

    #[test]
    fn test_head_caps_rows() {
        let series = shuffled_series();
        let view = series.full_view();
        assert_eq!(view.head(5).len(), 5);
        assert_eq!(view.head(500).len(), series.len());
        assert_eq!(view.head(5).first_date(), Some(date(2021, 3, 1)));
    }

    #[test]
    fn test_values_for_temporal_and_numeric_fields() {
        let series = scenario_series();
        let view = series.full_view();
        assert_eq!(view.values(Field::Volume), vec![100.0, 150.0, 120.0]);
        let xs = view.values(Field::Timestamp);
        assert_eq!(xs.len(), 3);
        assert!((xs[1] - xs[0] - 1.0).abs() < 1e-9);
    }
}
