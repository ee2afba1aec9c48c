//! Error types for the event-study pipeline.
//!
//! Distinguishes per-event failures, which are recorded as absent values
//! and logged, from batch failures that abort a study run.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building or analyzing an event study.
#[derive(Debug, Error)]
pub enum StudyError {
    /// No trading day exists at or after a filing date.
    #[error("no trading day found on or after {filing_date} (last trading date {last_trading_date})")]
    NoTradingDayFound {
        /// The filing date that could not be aligned.
        filing_date: NaiveDate,
        /// The last trading date in the price series.
        last_trading_date: NaiveDate,
    },

    /// Not enough trading days remain after an anchor for a return window.
    #[error("insufficient history: window of {window} trading days, {available} available")]
    InsufficientHistory {
        /// The requested window in trading days.
        window: usize,
        /// Trading days actually available after the anchor.
        available: usize,
    },

    /// A statement field needed by a ratio was not reported.
    #[error("missing statement field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A ratio's denominator was zero.
    #[error("division undefined for {ratio}: zero denominator")]
    DivisionUndefined {
        /// Name of the ratio that could not be computed.
        ratio: String,
    },

    /// Two filings aligned to the same trading day.
    #[error("duplicate event: multiple filings align to {event_date}")]
    DuplicateEvent {
        /// The trading date claimed by more than one filing.
        event_date: NaiveDate,
    },

    /// A statistical routine had fewer observations than it needs.
    #[error("insufficient samples: need {required}, have {available}")]
    InsufficientSamples {
        /// Minimum observations the routine requires.
        required: usize,
        /// Observations actually available.
        available: usize,
    },

    /// A price series was constructed with no rows.
    #[error("empty price series for {ticker}")]
    EmptyPriceSeries {
        /// Ticker the series was meant to hold.
        ticker: String,
    },

    /// A study was run with no filings.
    #[error("no filings provided")]
    NoFilings,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl StudyError {
    /// Creates a no-trading-day error.
    pub fn no_trading_day(filing_date: NaiveDate, last_trading_date: NaiveDate) -> Self {
        Self::NoTradingDayFound {
            filing_date,
            last_trading_date,
        }
    }

    /// Creates an insufficient-history error.
    pub fn insufficient_history(window: usize, available: usize) -> Self {
        Self::InsufficientHistory { window, available }
    }

    /// Creates a missing-field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a division-undefined error.
    pub fn division_undefined(ratio: impl Into<String>) -> Self {
        Self::DivisionUndefined {
            ratio: ratio.into(),
        }
    }

    /// Creates a duplicate-event error.
    pub fn duplicate_event(event_date: NaiveDate) -> Self {
        Self::DuplicateEvent { event_date }
    }

    /// Creates an insufficient-samples error.
    pub fn insufficient_samples(required: usize, available: usize) -> Self {
        Self::InsufficientSamples {
            required,
            available,
        }
    }

    /// Creates an empty-price-series error.
    pub fn empty_price_series(ticker: impl Into<String>) -> Self {
        Self::EmptyPriceSeries {
            ticker: ticker.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if the error affects a single event, window, or ratio.
    ///
    /// Per-event failures are recorded as absent values and logged; they
    /// never abort the batch.
    #[must_use]
    pub fn is_per_event(&self) -> bool {
        matches!(
            self,
            Self::NoTradingDayFound { .. }
                | Self::InsufficientHistory { .. }
                | Self::MissingField { .. }
                | Self::DivisionUndefined { .. }
                | Self::InsufficientSamples { .. }
        )
    }

    /// Returns true if the error aborts the batch.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !self.is_per_event()
    }
}

/// Result type alias for event-study operations.
pub type Result<T> = std::result::Result<T, StudyError>;
