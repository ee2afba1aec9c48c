//! Filing-date to trading-day alignment.
//!
//! Filings land on weekends, holidays, and after-hours dates with no bar
//! in the price series. The event date is the first trading day at or
//! after the filing date: a Saturday filing is measured from Monday's
//! close, never from a close that predates the filing.

use chrono::NaiveDate;

use event_study_core::error::{Result, StudyError};
use event_study_core::price::PriceSeries;

/// Aligns a filing date to the first trading day at or after it.
///
/// A filing date that is itself a trading day aligns to itself.
///
/// # Errors
/// Returns `NoTradingDayFound` when the filing date is after the last
/// trading date in the series.
pub fn align_to_trading_day(series: &PriceSeries, filing_date: NaiveDate) -> Result<NaiveDate> {
    match series.next_on_or_after(filing_date) {
        Some(index) => Ok(series.points()[index].date),
        None => Err(StudyError::no_trading_day(filing_date, series.last_date())),
    }
}
