//! Daily price series for a single ticker.
//!
//! A `PriceSeries` owns the trading calendar for a study: every lookup is
//! an index into its date-ordered rows, so "N days forward" always means
//! N trading days, never N calendar days.
//!
//! Construction sorts rows ascending by date and keeps the last row when
//! a date repeats, so downstream index math sees a strictly increasing
//! calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StudyError};

/// A single daily bar: closing price and optional traded volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: Decimal,
    /// Traded volume, when the source reports it.
    pub volume: Option<Decimal>,
}

impl PricePoint {
    /// Creates a bar with no volume.
    #[must_use]
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self {
            date,
            close,
            volume: None,
        }
    }

    /// Attaches traded volume to the bar.
    #[must_use]
    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = Some(volume);
        self
    }
}

/// Daily price history for one ticker, ordered ascending by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from unordered rows.
    ///
    /// Rows are sorted ascending by date; when a date repeats, the last
    /// row in input order wins.
    ///
    /// # Errors
    /// Returns `EmptyPriceSeries` when `points` is empty.
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Result<Self> {
        let ticker = ticker.into();
        if points.is_empty() {
            return Err(StudyError::empty_price_series(ticker));
        }

        let supplied = points.len();
        let mut by_date = BTreeMap::new();
        for point in points {
            by_date.insert(point.date, point);
        }
        let points: Vec<PricePoint> = by_date.into_values().collect();
        if points.len() < supplied {
            debug!(
                ticker = %ticker,
                dropped = supplied - points.len(),
                "Dropped repeated price dates, keeping the latest row"
            );
        }

        Ok(Self { ticker, points })
    }

    /// Ticker this series belongs to.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Number of trading days in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: construction rejects empty series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The ordered rows.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// First trading date.
    #[must_use]
    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    /// Last trading date.
    #[must_use]
    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    /// Index of the first trading day at or after `date`.
    ///
    /// Returns `None` when `date` is after the last trading date.
    #[must_use]
    pub fn next_on_or_after(&self, date: NaiveDate) -> Option<usize> {
        let index = self.points.partition_point(|p| p.date < date);
        (index < self.points.len()).then_some(index)
    }

    /// Index of an exact trading date, if it exists.
    #[must_use]
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        self.points.binary_search_by_key(&date, |p| p.date).ok()
    }

    /// Volume at `index` relative to its trailing average.
    ///
    /// The average spans the `lookback` rows ending at `index`, current
    /// row included. Returns `None` when fewer than `lookback` rows
    /// precede the index, any volume in the window is missing, or the
    /// average is zero.
    #[must_use]
    pub fn volume_change(&self, index: usize, lookback: usize) -> Option<Decimal> {
        if lookback == 0 || index >= self.points.len() {
            return None;
        }
        let start = (index + 1).checked_sub(lookback)?;

        let mut sum = Decimal::ZERO;
        for point in &self.points[start..=index] {
            sum += point.volume?;
        }
        let average = sum / Decimal::from(lookback as u64);
        if average == Decimal::ZERO {
            return None;
        }

        let current = self.points[index].volume?;
        Some((current - average) / average)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(points: Vec<PricePoint>) -> PriceSeries {
        PriceSeries::new("GOOGL", points).unwrap()
    }

    // ============================================
    // Construction Tests
    // ============================================

    #[test]
    fn construction_rejects_empty_rows() {
        let result = PriceSeries::new("GOOGL", vec![]);
        assert!(matches!(result, Err(StudyError::EmptyPriceSeries { .. })));
    }

    #[test]
    fn construction_sorts_rows_by_date() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 5), dec!(102)),
            PricePoint::new(date(2024, 3, 1), dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)),
        ]);

        let dates: Vec<NaiveDate> = s.points().iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 3, 1), date(2024, 3, 4), date(2024, 3, 5)]
        );
    }

    #[test]
    fn construction_keeps_last_row_for_repeated_date() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)),
            PricePoint::new(date(2024, 3, 1), dec!(105)),
        ]);

        assert_eq!(s.len(), 1);
        assert_eq!(s.points()[0].close, dec!(105));
    }

    #[test]
    fn first_and_last_dates() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)),
        ]);

        assert_eq!(s.first_date(), date(2024, 3, 1));
        assert_eq!(s.last_date(), date(2024, 3, 4));
    }

    // ============================================
    // next_on_or_after Tests
    // ============================================

    #[test]
    fn next_on_or_after_returns_exact_trading_day() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)),
        ]);

        assert_eq!(s.next_on_or_after(date(2024, 3, 1)), Some(0));
        assert_eq!(s.next_on_or_after(date(2024, 3, 4)), Some(1));
    }

    #[test]
    fn next_on_or_after_skips_weekend_gap() {
        // Friday 2024-03-01, Monday 2024-03-04; Saturday falls in between.
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)),
        ]);

        assert_eq!(s.next_on_or_after(date(2024, 3, 2)), Some(1));
    }

    #[test]
    fn next_on_or_after_before_series_start() {
        let s = series(vec![PricePoint::new(date(2024, 3, 1), dec!(100))]);
        assert_eq!(s.next_on_or_after(date(2024, 2, 1)), Some(0));
    }

    #[test]
    fn next_on_or_after_past_series_end() {
        let s = series(vec![PricePoint::new(date(2024, 3, 1), dec!(100))]);
        assert_eq!(s.next_on_or_after(date(2024, 3, 2)), None);
    }

    #[test]
    fn position_of_requires_exact_date() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)),
        ]);

        assert_eq!(s.position_of(date(2024, 3, 4)), Some(1));
        assert_eq!(s.position_of(date(2024, 3, 2)), None);
    }

    // ============================================
    // volume_change Tests
    // ============================================

    #[test]
    fn volume_change_against_trailing_average() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)).with_volume(dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)).with_volume(dec!(200)),
            PricePoint::new(date(2024, 3, 5), dec!(102)).with_volume(dec!(300)),
        ]);

        // Average of (100, 200, 300) is 200; (300 - 200) / 200 = 0.5.
        assert_eq!(s.volume_change(2, 3), Some(dec!(0.5)));
    }

    #[test]
    fn volume_change_none_with_short_history() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)).with_volume(dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)).with_volume(dec!(200)),
        ]);

        assert_eq!(s.volume_change(1, 3), None);
    }

    #[test]
    fn volume_change_none_when_volume_missing_in_window() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)).with_volume(dec!(100)),
            PricePoint::new(date(2024, 3, 4), dec!(101)),
            PricePoint::new(date(2024, 3, 5), dec!(102)).with_volume(dec!(300)),
        ]);

        assert_eq!(s.volume_change(2, 3), None);
    }

    #[test]
    fn volume_change_none_when_average_is_zero() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)).with_volume(dec!(0)),
            PricePoint::new(date(2024, 3, 4), dec!(101)).with_volume(dec!(0)),
        ]);

        assert_eq!(s.volume_change(1, 2), None);
    }

    #[test]
    fn volume_change_none_past_series_end() {
        let s = series(vec![
            PricePoint::new(date(2024, 3, 1), dec!(100)).with_volume(dec!(100)),
        ]);

        assert_eq!(s.volume_change(5, 1), None);
    }
}
