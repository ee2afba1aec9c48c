//! Forward returns over trading-day horizons.
//!
//! A horizon is stepped in trading-day index space, so weekends and
//! holidays never stretch the measurement: a 5-day return spans five bars
//! regardless of the calendar gaps between them.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use event_study_core::error::{Result, StudyError};
use event_study_core::price::PriceSeries;

/// Computes the simple forward return `window` trading days after an
/// anchor date.
///
/// The anchor is first aligned to the nearest trading day at or after
/// `anchor_date`, then the return is `close[i + window] / close[i] - 1`.
///
/// # Errors
/// * `NoTradingDayFound` when the anchor is after the last trading date.
/// * `InsufficientHistory` when fewer than `window` trading days remain
///   after the anchor, or the anchor close is zero.
pub fn forward_return(
    series: &PriceSeries,
    anchor_date: NaiveDate,
    window: usize,
) -> Result<Decimal> {
    let start = series
        .next_on_or_after(anchor_date)
        .ok_or_else(|| StudyError::no_trading_day(anchor_date, series.last_date()))?;
    forward_return_at(series, start, window)
}

/// Forward return anchored at a trading-day index instead of a date.
///
/// The baseline sampler walks indices directly; the event path goes
/// through [`forward_return`].
///
/// # Errors
/// Returns `InsufficientHistory` when the horizon runs past the series
/// or the anchor close is zero.
pub fn forward_return_at(series: &PriceSeries, start: usize, window: usize) -> Result<Decimal> {
    let points = series.points();
    if start >= points.len() {
        return Err(StudyError::insufficient_history(window, 0));
    }

    let available = points.len() - start - 1;
    let end = start + window;
    if end >= points.len() {
        return Err(StudyError::insufficient_history(window, available));
    }

    let start_close = points[start].close;
    if start_close == Decimal::ZERO {
        return Err(StudyError::insufficient_history(window, available));
    }

    Ok((points[end].close - start_close) / start_close)
}
