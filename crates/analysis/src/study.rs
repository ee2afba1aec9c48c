//! Composed study runner.
//!
//! Wires the pipeline together: build the event dataset, test each return
//! window against its baseline, and correlate ratios with returns.
//! Downstream reporting works from the bundled `StudyReport`.

use serde::{Deserialize, Serialize};
use tracing::info;

use event_study_core::config::StudyConfig;
use event_study_core::error::Result;
use event_study_core::filing::FilingRecord;
use event_study_core::price::PriceSeries;

use crate::correlation::{correlate, CorrelationResult};
use crate::dataset::EventDataset;
use crate::significance::{test_windows, TestResult};

/// Everything one study run produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyReport {
    /// The event table.
    pub dataset: EventDataset,
    /// Welch test per return window.
    pub test_results: Vec<TestResult>,
    /// Pearson correlation per (ratio, window) pair.
    pub correlations: Vec<CorrelationResult>,
    /// Configuration the study ran with.
    pub config: StudyConfig,
    /// Filings seen in the input.
    pub filings_seen: usize,
    /// Filings dropped because they could not be aligned.
    pub filings_skipped: usize,
}

impl StudyReport {
    /// Share of filings that made it into the dataset.
    #[must_use]
    pub fn alignment_rate(&self) -> f64 {
        if self.filings_seen == 0 {
            return 0.0;
        }
        self.dataset.len() as f64 / self.filings_seen as f64
    }
}

/// Runs the full pipeline over one ticker's prices and filings.
#[derive(Debug, Clone)]
pub struct EventStudy {
    config: StudyConfig,
}

impl EventStudy {
    /// Creates a study runner with a validated configuration.
    ///
    /// # Errors
    /// Returns `Configuration` when the config is invalid.
    pub fn new(config: StudyConfig) -> Result<Self> {
        Ok(Self {
            config: config.validated()?,
        })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &StudyConfig {
        &self.config
    }

    /// Builds the dataset, tests each window, and correlates ratios.
    ///
    /// # Errors
    /// * `NoFilings` when `filings` is empty.
    /// * `DuplicateEvent` when two filings align to the same trading day.
    pub fn run(
        &self,
        filings: &[FilingRecord],
        series: &PriceSeries,
        benchmark: Option<&PriceSeries>,
    ) -> Result<StudyReport> {
        let dataset = EventDataset::build(filings, series, benchmark, &self.config)?;
        let filings_skipped = filings.len() - dataset.len();
        info!(
            ticker = series.ticker(),
            events = dataset.len(),
            filings_skipped,
            "Event dataset built"
        );

        let test_results = test_windows(&dataset, series, &self.config);
        let correlations = correlate(&dataset);

        Ok(StudyReport {
            dataset,
            test_results,
            correlations,
            config: self.config.clone(),
            filings_seen: filings.len(),
            filings_skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_study_core::error::StudyError;

    // ============================================
    // Construction Tests
    // ============================================

    #[test]
    fn new_normalizes_the_window_list() {
        let study = EventStudy::new(StudyConfig::new(vec![20, 5, 5])).unwrap();
        assert_eq!(study.config().windows, vec![5, 20]);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let result = EventStudy::new(StudyConfig::new(vec![]));
        assert!(matches!(result, Err(StudyError::Configuration(_))));
    }
}
