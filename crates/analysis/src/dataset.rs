//! Event dataset construction.
//!
//! Walks filings in filing-date order, aligns each to its event day, and
//! collects forward returns, ratios, and volume features into one
//! chronological table. Per-filing failures are recorded and skipped;
//! only duplicate event days and empty inputs abort the batch.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use event_study_core::config::StudyConfig;
use event_study_core::error::{Result, StudyError};
use event_study_core::filing::FilingRecord;
use event_study_core::price::PriceSeries;

use crate::align::align_to_trading_day;
use crate::ratios::RatioSet;
use crate::returns::forward_return;

/// One filing aligned to its event day, with everything measured on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingEvent {
    /// Date the filing was published.
    pub filing_date: NaiveDate,
    /// First trading day at or after the filing date.
    pub event_date: NaiveDate,
    /// Subject forward return per window, absent when history ran out.
    pub returns: BTreeMap<usize, Option<Decimal>>,
    /// Benchmark forward return per window, when a benchmark was supplied.
    pub benchmark_returns: BTreeMap<usize, Option<Decimal>>,
    /// Ratios extracted from the filing.
    pub ratios: RatioSet,
    /// Event-day volume against its trailing average.
    pub volume_change: Option<Decimal>,
    /// Marks the row as an event observation.
    pub is_event_row: bool,
}

impl FilingEvent {
    /// Subject forward return for one window.
    #[must_use]
    pub fn subject_return(&self, window: usize) -> Option<Decimal> {
        self.returns.get(&window).copied().flatten()
    }

    /// Benchmark forward return for one window.
    #[must_use]
    pub fn benchmark_return(&self, window: usize) -> Option<Decimal> {
        self.benchmark_returns.get(&window).copied().flatten()
    }

    /// Subject return minus benchmark return, when both are present.
    #[must_use]
    pub fn excess_return(&self, window: usize) -> Option<Decimal> {
        Some(self.subject_return(window)? - self.benchmark_return(window)?)
    }
}

/// Chronological table of filing events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDataset {
    events: Vec<FilingEvent>,
    windows: Vec<usize>,
}

impl EventDataset {
    /// Builds the dataset for one ticker's filings.
    ///
    /// Filings are processed in filing-date order. A filing whose date
    /// cannot be aligned is skipped and logged.
    ///
    /// # Errors
    /// * `NoFilings` when `filings` is empty.
    /// * `DuplicateEvent` when two filings align to the same trading day.
    pub fn build(
        filings: &[FilingRecord],
        series: &PriceSeries,
        benchmark: Option<&PriceSeries>,
        config: &StudyConfig,
    ) -> Result<Self> {
        if filings.is_empty() {
            return Err(StudyError::NoFilings);
        }

        let mut ordered: Vec<&FilingRecord> = filings.iter().collect();
        ordered.sort_by_key(|filing| filing.filing_date);

        let mut events: Vec<FilingEvent> = Vec::with_capacity(ordered.len());
        for filing in ordered {
            let event_date = match align_to_trading_day(series, filing.filing_date) {
                Ok(date) => date,
                Err(error) => {
                    warn!(
                        filing_date = %filing.filing_date,
                        error = %error,
                        "Skipping filing with no alignable trading day"
                    );
                    continue;
                }
            };

            // Alignment is monotone over sorted filings, so a duplicate
            // event day always lands next to its twin.
            if events.last().map(|event| event.event_date) == Some(event_date) {
                return Err(StudyError::duplicate_event(event_date));
            }

            let mut returns = BTreeMap::new();
            let mut benchmark_returns = BTreeMap::new();
            for &window in &config.windows {
                returns.insert(window, measure(series, event_date, window));
                if let Some(bench) = benchmark {
                    benchmark_returns.insert(window, measure(bench, event_date, window));
                }
            }

            let volume_change = series
                .position_of(event_date)
                .and_then(|index| series.volume_change(index, config.volume_lookback));

            events.push(FilingEvent {
                filing_date: filing.filing_date,
                event_date,
                returns,
                benchmark_returns,
                ratios: RatioSet::compute(&filing.fields),
                volume_change,
                is_event_row: true,
            });
        }

        Ok(Self {
            events,
            windows: config.windows.clone(),
        })
    }

    /// The events in event-date order.
    #[must_use]
    pub fn events(&self) -> &[FilingEvent] {
        &self.events
    }

    /// The return windows the dataset was built with.
    #[must_use]
    pub fn windows(&self) -> &[usize] {
        &self.windows
    }

    /// Number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when every filing was skipped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Present subject returns for one window, in event order.
    #[must_use]
    pub fn returns_for_window(&self, window: usize) -> Vec<Decimal> {
        self.events
            .iter()
            .filter_map(|event| event.subject_return(window))
            .collect()
    }
}

fn measure(series: &PriceSeries, event_date: NaiveDate, window: usize) -> Option<Decimal> {
    match forward_return(series, event_date, window) {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(
                event_date = %event_date,
                window,
                error = %error,
                "Forward return unavailable"
            );
            None
        }
    }
}
